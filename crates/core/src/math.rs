use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Maps a pointer position onto the unit arcball hemisphere.
///
/// The pointer is recentred on the viewport and divided by `radius`. Points
/// outside the unit circle are projected radially onto its rim (z = 0),
/// points inside are lifted onto the front hemisphere.
///
/// `width`, `height` and `radius` must be positive.
pub fn point_to_sphere(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Vec3 {
    debug_assert!(radius > 0.0, "arcball radius must be positive");
    let x = (x - width * 0.5) / radius;
    let y = (y - height * 0.5) / radius;
    let sq_length = x * x + y * y;
    if sq_length > 1.0 {
        let normal = 1.0 / sq_length.sqrt();
        Vec3::new(x * normal, y * normal, 0.0)
    } else {
        Vec3::new(x, y, (1.0 - sq_length).sqrt())
    }
}

/// Yaw/pitch/roll to quaternion using half angles, with pitch on x, yaw on y
/// and roll on z.
pub fn quat_from_euler(yaw: f32, pitch: f32, roll: f32) -> Quat {
    let (sin_x, cos_x) = (pitch * 0.5).sin_cos();
    let (sin_y, cos_y) = (yaw * 0.5).sin_cos();
    let (sin_z, cos_z) = (roll * 0.5).sin_cos();
    Quat::from_xyzw(
        sin_x * cos_y * cos_z - cos_x * sin_y * sin_z,
        cos_x * sin_y * cos_z + sin_x * cos_y * sin_z,
        cos_x * cos_y * sin_z - sin_x * sin_y * cos_z,
        cos_x * cos_y * cos_z + sin_x * sin_y * sin_z,
    )
}

/// Window coordinates (x, y in pixels, z in 0..1) back to object space,
/// `gluUnProject` style. `viewport` is `[x, y, width, height]`.
pub fn unproject(
    window: Vec3,
    model_view: Mat4,
    projection: Mat4,
    viewport: [f32; 4],
) -> Option<Vec3> {
    let [vx, vy, vw, vh] = viewport;
    if vw <= 0.0 || vh <= 0.0 {
        return None;
    }
    let combined = projection * model_view;
    if combined.determinant().abs() <= f32::EPSILON * f32::EPSILON {
        return None;
    }
    let inverse = combined.inverse();
    let ndc = Vec4::new(
        (window.x - vx) / vw * 2.0 - 1.0,
        (window.y - vy) / vh * 2.0 - 1.0,
        window.z * 2.0 - 1.0,
        1.0,
    );
    let object = inverse * ndc;
    if object.w == 0.0 || !object.w.is_finite() {
        return None;
    }
    Some(object.truncate() / object.w)
}

/// Object space to window coordinates; the inverse of [`unproject`].
pub fn project(
    object: Vec3,
    model_view: Mat4,
    projection: Mat4,
    viewport: [f32; 4],
) -> Option<Vec3> {
    let [vx, vy, vw, vh] = viewport;
    let clip = projection * model_view * object.extend(1.0);
    if clip.w.abs() <= 1.0e-6 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec3::new(
        vx + (ndc.x * 0.5 + 0.5) * vw,
        vy + (ndc.y * 0.5 + 0.5) * vh,
        ndc.z * 0.5 + 0.5,
    ))
}

/// One step of a first-order low-pass filter.
pub fn lerp_toward(current: Vec2, target: Vec2, amount: f32) -> Vec2 {
    current + (target - current) * amount
}
