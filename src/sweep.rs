//! The color sweep: the deterministic, time-varying color that every
//! point escaping on the same tick is painted with.  Two policies are
//! provided.  The channel bounce walks an RGB triple up and down
//! inside per-channel bands, which produces the characteristic smooth
//! banding of the animation; the palette cycle steps through a fixed
//! ordered color table and wraps.  Either way, a tick's batch is
//! painted with `current()` and the state moves exactly once per tick
//! via `advance()`.
use image::Rgb;
use num::clamp;

/// The default speed at which the bouncing channels move.
pub const DEFAULT_COLOR_STEP: i32 = 2;

/// One bouncing color channel: a value that moves by `step` in the
/// current direction and reverses whenever the next move would leave
/// the `min..=max` band.  The value itself never leaves the band.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Channel {
    value: i32,
    step: i32,
    direction: i32,
    min: i32,
    max: i32,
}

impl Channel {
    /// Constructor.  `direction` is +1 or -1; `value` is expected to
    /// start inside the band.
    pub fn new(value: i32, step: i32, direction: i32, min: i32, max: i32) -> Channel {
        Channel {
            value,
            step,
            direction,
            min,
            max,
        }
    }

    /// The channel's current 8-bit sample.
    pub fn value(&self) -> u8 {
        clamp(self.value, 0, 255) as u8
    }

    fn advance(&mut self) {
        let next = self.value + self.step * self.direction;
        if next < self.min || next > self.max {
            self.direction = -self.direction;
        }
        self.value = clamp(self.value + self.step * self.direction, self.min, self.max);
    }
}

/// The channel-bounce sweep: three independent channels, seeded blue
/// and drifting at slightly different speeds so the mix never repeats
/// over a short window.  Red and green may use the full 0..=255 band;
/// blue keeps a raised floor so the image never goes fully dark.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelBounce {
    channels: [Channel; 3],
}

impl ChannelBounce {
    /// Constructor.  `step` is the base speed; values below 1 are
    /// raised to 1.
    pub fn new(step: i32) -> ChannelBounce {
        let step = if step < 1 { 1 } else { step };
        ChannelBounce {
            channels: [
                Channel::new(0, step + 2, 1, 0, 255),
                Channel::new(0, step + 1, 1, 0, 255),
                Channel::new(255, step, -1, 100, 255),
            ],
        }
    }

    fn current(&self) -> Rgb<u8> {
        Rgb {
            data: [
                self.channels[0].value(),
                self.channels[1].value(),
                self.channels[2].value(),
            ],
        }
    }

    fn advance(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.advance();
        }
    }
}

/// The palette-cycle sweep: a fixed ordered color table and an index
/// that wraps around it, one entry per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteCycle {
    palette: Vec<Rgb<u8>>,
    index: usize,
}

impl PaletteCycle {
    /// Constructor.  Fails on an empty palette, which would leave no
    /// color to paint with.
    pub fn new(palette: Vec<Rgb<u8>>) -> Result<PaletteCycle, String> {
        if palette.is_empty() {
            return Err("The palette must contain at least one color.".to_string());
        }
        Ok(PaletteCycle { palette, index: 0 })
    }

    /// A built-in twelve-entry palette sweeping blue to red and back
    /// around the hue wheel.
    pub fn rainbow() -> PaletteCycle {
        PaletteCycle {
            palette: vec![
                Rgb { data: [0, 0, 255] },
                Rgb { data: [0, 127, 255] },
                Rgb { data: [0, 255, 255] },
                Rgb { data: [0, 255, 127] },
                Rgb { data: [0, 255, 0] },
                Rgb { data: [127, 255, 0] },
                Rgb { data: [255, 255, 0] },
                Rgb { data: [255, 127, 0] },
                Rgb { data: [255, 0, 0] },
                Rgb { data: [255, 0, 127] },
                Rgb { data: [255, 0, 255] },
                Rgb { data: [127, 0, 255] },
            ],
            index: 0,
        }
    }

    fn current(&self) -> Rgb<u8> {
        self.palette[self.index]
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.palette.len();
    }
}

/// A color sweep policy.  Deterministic: the same starting state and
/// the same number of `advance` calls always produce the same color.
#[derive(Clone, Debug, PartialEq)]
pub enum SweepPolicy {
    /// Three RGB channels bouncing inside their bands.
    Bounce(ChannelBounce),
    /// A fixed palette cycled modulo its length.
    Cycle(PaletteCycle),
}

impl SweepPolicy {
    /// The color for the current tick's batch of escaped points.
    pub fn current(&self) -> Rgb<u8> {
        match *self {
            SweepPolicy::Bounce(ref bounce) => bounce.current(),
            SweepPolicy::Cycle(ref cycle) => cycle.current(),
        }
    }

    /// Moves the sweep to the next tick's color.  Called exactly once
    /// per tick, after the batch has been painted.
    pub fn advance(&mut self) {
        match *self {
            SweepPolicy::Bounce(ref mut bounce) => bounce.advance(),
            SweepPolicy::Cycle(ref mut cycle) => cycle.advance(),
        }
    }
}

impl Default for SweepPolicy {
    fn default() -> SweepPolicy {
        SweepPolicy::Bounce(ChannelBounce::new(DEFAULT_COLOR_STEP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_never_leave_their_bands() {
        let mut sweep = ChannelBounce::new(DEFAULT_COLOR_STEP);
        for _ in 0..2000 {
            sweep.advance();
            assert!(sweep.channels[0].value >= 0 && sweep.channels[0].value <= 255);
            assert!(sweep.channels[1].value >= 0 && sweep.channels[1].value <= 255);
            assert!(sweep.channels[2].value >= 100 && sweep.channels[2].value <= 255);
        }
    }

    #[test]
    fn a_channel_descends_after_bouncing_off_its_ceiling() {
        let mut channel = Channel::new(250, 4, 1, 0, 255);
        // Climb to the top of the band.
        channel.advance();
        assert_eq!(channel.value, 254);
        // The next move would overshoot 255, so the direction flips
        // and the value strictly decreases until the floor.
        let mut previous = channel.value;
        channel.advance();
        assert!(channel.value < previous);
        previous = channel.value;
        for _ in 0..50 {
            channel.advance();
            if previous <= 4 {
                break;
            }
            assert!(channel.value < previous);
            previous = channel.value;
        }
    }

    #[test]
    fn a_channel_climbs_after_bouncing_off_its_floor() {
        let mut channel = Channel::new(102, 3, -1, 100, 255);
        channel.advance();
        // 99 would leave the band, so the move reverses.
        assert_eq!(channel.value, 105);
        assert_eq!(channel.direction, 1);
    }

    #[test]
    fn the_bounce_is_deterministic() {
        let mut a = ChannelBounce::new(3);
        let mut b = ChannelBounce::new(3);
        for _ in 0..500 {
            assert_eq!(a.current(), b.current());
            a.advance();
            b.advance();
        }
    }

    #[test]
    fn the_palette_wraps_modulo_its_length() {
        let palette = vec![
            Rgb { data: [1, 0, 0] },
            Rgb { data: [0, 1, 0] },
            Rgb { data: [0, 0, 1] },
        ];
        let mut cycle = PaletteCycle::new(palette.clone()).unwrap();
        for tick in 0..10 {
            assert_eq!(cycle.current(), palette[tick % 3]);
            cycle.advance();
        }
    }

    #[test]
    fn an_empty_palette_is_rejected() {
        assert!(PaletteCycle::new(vec![]).is_err());
    }

    #[test]
    fn the_default_sweep_starts_blue() {
        assert_eq!(SweepPolicy::default().current(), Rgb { data: [0, 0, 255] });
    }
}
