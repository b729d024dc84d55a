#![warn(missing_docs)]
//! First-person camera and view-frustum culling math.

use glam::{Mat4, Vec3, Vec4, Vec4Swizzles};

/// First-person camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: 70.0_f32.to_radians(),
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Forward direction vector (where the camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right direction vector (camera's local X axis).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Up direction vector (camera's local Y axis).
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// View matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Projection matrix (camera space -> clip space, OpenGL depth range).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Move along the forward vector.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Move along the right vector.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Move along the world Y axis.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Add to yaw and pitch, clamping pitch short of the poles.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Update the aspect ratio (call when the viewport resizes).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Frustum derived from the current view-projection matrix.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }
}

/// View frustum as six inward-facing clip planes.
///
/// No persistent identity: the planes are purely a function of the latest
/// view-projection matrix.
#[derive(Debug, Clone, Default)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract the six planes from a view-projection matrix.
    ///
    /// Applies the row addition/subtraction identities (left = row3 + row0,
    /// right = row3 - row0, bottom = row3 + row1, top = row3 - row1,
    /// near = row3 + row2, far = row3 - row2) and normalizes each plane by
    /// the length of its normal.
    pub fn from_view_projection(view_projection: &Mat4) -> Self {
        let r0 = view_projection.row(0);
        let r1 = view_projection.row(1);
        let r2 = view_projection.row(2);
        let r3 = view_projection.row(3);

        let mut planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2];
        for plane in &mut planes {
            let length = plane.xyz().length();
            if length > 0.0 {
                *plane /= length;
            }
        }

        Self { planes }
    }

    /// Recompute the planes from a fresh view-projection matrix.
    pub fn update(&mut self, view_projection: &Mat4) {
        *self = Self::from_view_projection(view_projection);
    }

    /// Conservative axis-aligned-box visibility test.
    ///
    /// A box is invisible only when all eight corners lie behind a single
    /// plane. A box straddling a plane, or outside several planes without
    /// being uniformly behind any one of them, is reported visible; false
    /// positives are possible, false negatives are not.
    pub fn is_box_visible(&self, min: Vec3, max: Vec3) -> bool {
        let corners = [
            Vec4::new(min.x, min.y, min.z, 1.0),
            Vec4::new(max.x, min.y, min.z, 1.0),
            Vec4::new(min.x, max.y, min.z, 1.0),
            Vec4::new(max.x, max.y, min.z, 1.0),
            Vec4::new(min.x, min.y, max.z, 1.0),
            Vec4::new(max.x, min.y, max.z, 1.0),
            Vec4::new(min.x, max.y, max.z, 1.0),
            Vec4::new(max.x, max.y, max.z, 1.0),
        ];

        for plane in &self.planes {
            if corners.iter().all(|corner| plane.dot(*corner) < 0.0) {
                return false;
            }
        }
        true
    }
}
