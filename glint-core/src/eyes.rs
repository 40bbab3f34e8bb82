//! Pair of eyes on one display
//!
//! `Eyes` owns both `Eye`s, the framebuffer they are painted into and the
//! display device. Every preset rewrites the parameters it cares about on
//! both eyes, then clears the framebuffer, paints both eyes and presents
//! the frame. There is no blending between presets.

use embedded_graphics::geometry::Point;
use glint_display::{DisplayDevice, FrameBuffer, FrameBufferError};

use crate::config::{EyeLayout, EyesConfig};
use crate::expression::{self, Direction, Expression, Side};
use crate::eye::{Eye, DARK};
use crate::eyelid::EyelidRates;
use crate::geometry::Bounds;
use crate::traits::Canvas;

/// Errors from bringing the eyes up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyesError<E> {
    /// The display device failed
    Display(E),
    /// The display is larger than the framebuffer supports
    Canvas(FrameBufferError),
}

/// Two eyes drawn on one display
pub struct Eyes<D> {
    /// Eye on the display's left (the subject's right eye)
    left: Eye,
    /// Eye on the display's right (the subject's left eye)
    right: Eye,
    canvas: FrameBuffer,
    display: D,
    config: EyesConfig,
}

impl<D: DisplayDevice> Eyes<D> {
    /// Bring up the display with the default layout and show normal eyes
    pub fn new(display: D) -> Result<Self, EyesError<D::Error>> {
        Self::with_config(display, EyesConfig::default())
    }

    /// Bring up the display with a custom layout and show normal eyes
    ///
    /// Initializes and blanks the device, sizes the framebuffer to the
    /// reported dimensions and presents one blank frame before the first
    /// preset.
    pub fn with_config(mut display: D, config: EyesConfig) -> Result<Self, EyesError<D::Error>> {
        let size = display.initialize().map_err(EyesError::Display)?;
        display.clear().map_err(EyesError::Display)?;

        let canvas = FrameBuffer::new(size).map_err(EyesError::Canvas)?;
        display.present(&canvas).map_err(EyesError::Display)?;

        let mut eyes = Self {
            left: Eye::new(),
            right: Eye::new(),
            canvas,
            display,
            config,
        };
        eyes.set_normal().map_err(EyesError::Display)?;
        Ok(eyes)
    }

    /// Idle eyes: configured size and pupil, lids open
    pub fn set_normal(&mut self) -> Result<(), D::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Eyes: normal");

        for side in [Side::Left, Side::Right] {
            let layout = *self.layout(side);
            let eye = self.eye_mut(side);
            eye.set_white_eye(
                layout.center_x,
                layout.center_y,
                layout.width,
                layout.height,
            );
            eye.set_black_eye(
                layout.pupil_offset_x,
                layout.pupil_offset_y,
                layout.pupil_diameter,
            );
            eye.set_eyelid_rates(EyelidRates::OPEN);
        }
        self.redraw()
    }

    /// Angry eyes: upper lids slope down toward the nose
    ///
    /// `level` is clamped to 1-10. White regions and pupils are kept.
    pub fn set_anger(&mut self, level: i32) -> Result<(), D::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Eyes: anger level {}", level);

        let rates = expression::anger_rates(level);
        self.left.set_eyelid_rates(rates.eyelids(Side::Left));
        self.right.set_eyelid_rates(rates.eyelids(Side::Right));
        self.redraw()
    }

    /// Surprised eyes: square whites of side 50 + 3 * level
    ///
    /// `level` is clamped to 1-5. Pupils and lid rates are kept; the lid
    /// polygons follow the new white region.
    pub fn set_surprised(&mut self, level: i32) -> Result<(), D::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Eyes: surprised level {}", level);

        let size = expression::surprise_size(level);
        for side in [Side::Left, Side::Right] {
            let layout = *self.layout(side);
            self.eye_mut(side)
                .set_white_eye(layout.center_x, layout.center_y, size, size);
        }
        self.redraw()
    }

    /// Move both pupils toward `direction`
    ///
    /// `rate` is clamped to -1.0..=1.0 and scales how far the pupils move
    /// from their rest offset. Each pupil disk stays inside its white
    /// ellipse.
    pub fn set_black_eyes(&mut self, direction: Direction, rate: f32) -> Result<(), D::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Eyes: gaze {} rate {}", direction, rate);

        for side in [Side::Left, Side::Right] {
            let layout = *self.layout(side);
            let eye = self.eye_mut(side);
            let white = *eye.white();
            let reach = expression::pupil_reach(white.width, white.height, layout.pupil_diameter);
            let offset = expression::gaze_offset(layout.pupil_offset(), reach, direction, rate);
            eye.set_black_eye(offset.x, offset.y, layout.pupil_diameter);
        }
        self.redraw()
    }

    /// Apply a preset given as a value
    pub fn apply(&mut self, expression: Expression) -> Result<(), D::Error> {
        match expression {
            Expression::Normal => self.set_normal(),
            Expression::Anger(level) => self.set_anger(level),
            Expression::Surprised(level) => self.set_surprised(level),
            Expression::Gaze { direction, rate } => self.set_black_eyes(direction, rate),
        }
    }

    /// Eye on the display's left
    pub fn left(&self) -> &Eye {
        &self.left
    }

    /// Eye on the display's right
    pub fn right(&self) -> &Eye {
        &self.right
    }

    pub fn eye(&self, side: Side) -> &Eye {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Last frame handed to the display
    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn config(&self) -> &EyesConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Give the display device back
    pub fn release(self) -> D {
        self.display
    }

    fn layout(&self, side: Side) -> &EyeLayout {
        match side {
            Side::Left => &self.config.left,
            Side::Right => &self.config.right,
        }
    }

    fn eye_mut(&mut self, side: Side) -> &mut Eye {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Clear, paint both eyes, present
    fn redraw(&mut self) -> Result<(), D::Error> {
        let full = Bounds::new(
            Point::zero(),
            Point::new(self.canvas.width() as i32, self.canvas.height() as i32),
        );
        // Framebuffer drawing cannot fail
        self.canvas
            .fill_rect(full, DARK)
            .unwrap_or_else(|never| match never {});
        self.left
            .draw(&mut self.canvas)
            .unwrap_or_else(|never| match never {});
        self.right
            .draw(&mut self.canvas)
            .unwrap_or_else(|never| match never {});

        self.display.present(&self.canvas)
    }
}
