//! Looping typewriter for the home tagline
//!
//! Types a string, holds it, backspaces to the prefix it shares with the next
//! string, then types the rest of the next one. Wraps around forever.

/// Seconds per typed character
const TYPE_SPEED: f32 = 0.06;
/// Seconds per erased character
const BACK_SPEED: f32 = 0.04;
/// Hold time on a fully typed string
const BACK_DELAY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Erasing,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    strings: Vec<Vec<char>>,
    index: usize,
    /// Characters of the current string on screen
    shown: usize,
    phase: Phase,
    timer: f32,
}

impl Typewriter {
    pub fn new(strings: Vec<String>) -> Self {
        Self {
            strings: strings.iter().map(|s| s.chars().collect()).collect(),
            index: 0,
            shown: 0,
            phase: Phase::Typing,
            timer: 0.0,
        }
    }

    /// Text currently on screen
    pub fn text(&self) -> String {
        self.strings
            .get(self.index)
            .map(|s| s[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    /// Length of the prefix shared by the current and the next string
    fn common_prefix(&self) -> usize {
        let current = &self.strings[self.index];
        let next = &self.strings[(self.index + 1) % self.strings.len()];
        current.iter().zip(next).take_while(|(a, b)| a == b).count()
    }

    pub fn advance(&mut self, dt: f32) {
        if self.strings.is_empty() {
            return;
        }
        self.timer += dt;

        loop {
            match self.phase {
                Phase::Typing => {
                    if self.shown >= self.strings[self.index].len() {
                        self.phase = Phase::Holding;
                    } else if self.timer >= TYPE_SPEED {
                        self.timer -= TYPE_SPEED;
                        self.shown += 1;
                    } else {
                        break;
                    }
                }
                Phase::Holding => {
                    if self.timer >= BACK_DELAY {
                        self.timer -= BACK_DELAY;
                        self.phase = Phase::Erasing;
                    } else {
                        break;
                    }
                }
                Phase::Erasing => {
                    if self.shown <= self.common_prefix() {
                        self.index = (self.index + 1) % self.strings.len();
                        self.phase = Phase::Typing;
                    } else if self.timer >= BACK_SPEED {
                        self.timer -= BACK_SPEED;
                        self.shown -= 1;
                    } else {
                        break;
                    }
                }
            }
        }
    }
}
