/// Repeating callback slot driven by the host frame clock.
///
/// Elapsed time is fed in through [`Interval::advance`], which reports how
/// many whole periods have passed since the last call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period_ms: f32,
    elapsed_ms: f32,
}

pub const SIXTY_HZ_MS: f32 = 1000.0 / 60.0;

impl Interval {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(f32::EPSILON),
            elapsed_ms: 0.0,
        }
    }

    pub fn sixty_hz() -> Self {
        Self::new(SIXTY_HZ_MS)
    }

    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += elapsed_ms;
        let ticks = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms -= ticks * self.period_ms;
        ticks as u32
    }
}
