use serde::{Serialize, Deserialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Idle,
    Playing
}

/// State of the slider that selects how many sample points the charts consider,
/// and of the play/pause button that animates it. The controller holds no timer:
/// whoever owns it calls tick(.) at a fixed interval while it is playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderController {

    n : usize,

    max_n : usize,

    state : PlayState

}

impl SliderController {

    /// Idle controller with the slider halfway through [0, max_n].
    pub fn new(max_n : usize) -> Self {
        Self { n : max_n / 2, max_n, state : PlayState::Idle }
    }

    /// Idle controller with the slider at n (clamped to max_n).
    pub fn at(max_n : usize, n : usize) -> Self {
        Self { n : n.min(max_n), max_n, state : PlayState::Idle }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Starts playing. A slider sitting at the maximum is rewound to zero first.
    pub fn play(&mut self) {
        if self.state == PlayState::Idle {
            if self.n >= self.max_n {
                self.n = 0;
            }
            self.state = PlayState::Playing;
        }
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Idle;
    }

    /// Play/pause button press.
    pub fn toggle(&mut self) -> PlayState {
        match self.state {
            PlayState::Idle => self.play(),
            PlayState::Playing => self.pause()
        }
        self.state
    }

    /// Timer tick. While playing, advances the slider by one; a tick that finds
    /// the slider at the maximum stops the animation instead. Idle ticks do nothing.
    pub fn tick(&mut self) -> PlayState {
        if self.state == PlayState::Playing {
            if self.n >= self.max_n {
                self.n = self.max_n;
                self.state = PlayState::Idle;
            } else {
                self.n += 1;
            }
        }
        self.state
    }

    /// Slider drag: moves to n (clamped to max_n) and stops any animation.
    pub fn seek(&mut self, n : usize) {
        self.n = n.min(self.max_n);
        self.state = PlayState::Idle;
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            PlayState::Idle => "Play",
            PlayState::Playing => "Pause"
        }
    }

}

/// Source of the fixed-interval ticks that drive an animation.
pub trait Clock {

    /// Blocks (or pretends to) for the informed interval.
    fn wait(&mut self, interval : Duration);

}

/// Wall clock; waits by sleeping the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {

    fn wait(&mut self, interval : Duration) {
        std::thread::sleep(interval);
    }

}

/// Clock that returns immediately, recording how long it was asked to wait.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {

    pub waits : usize,

    pub elapsed : Duration

}

impl Clock for ManualClock {

    fn wait(&mut self, interval : Duration) {
        self.waits += 1;
        self.elapsed += interval;
    }

}

/// Drives a controller with a clock. Only one playback can borrow a controller
/// at a time, and the controller is paused when the playback is dropped, so no
/// tick outlives the view that owns the slider.
pub struct Playback<'a, C>
where
    C : Clock
{

    controller : &'a mut SliderController,

    clock : C,

    interval : Duration

}

impl<'a, C> Playback<'a, C>
where
    C : Clock
{

    pub fn new(controller : &'a mut SliderController, clock : C, interval : Duration) -> Self {
        Self { controller, clock, interval }
    }

    pub fn controller(&self) -> &SliderController {
        &*self.controller
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Presses play (rewinding a finished slider) and ticks until the controller
    /// goes idle. frame(.) is called with the slider position after every tick;
    /// returning false pauses the animation. Returns the number of ticks.
    pub fn run<F>(&mut self, mut frame : F) -> usize
    where
        F : FnMut(usize) -> bool
    {
        self.controller.play();
        let mut ticks = 0;
        while self.controller.is_playing() {
            self.clock.wait(self.interval);
            self.controller.tick();
            ticks += 1;
            if !frame(self.controller.n()) {
                self.controller.pause();
            }
        }
        tracing::debug!(ticks, n = self.controller.n(), "playback finished");
        ticks
    }

}

impl<'a, C> Drop for Playback<'a, C>
where
    C : Clock
{

    fn drop(&mut self) {
        self.controller.pause();
    }

}
