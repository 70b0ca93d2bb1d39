//! # Navigation Flow
//!
//! A stack of screens. The top screen runs; when it finishes it tells the
//! controller where to go next by returning a [`Transition`].
//!
//! ```text
//!   go_to(B)         go_to(C)          go_back()
//!  [A] ───────► [A, B] ───────► [A, B, C] ───────► [A, B]
//! ```
//!
//! Screens never call each other. Whatever they share is the context `C`
//! handed to `run`, so the controller itself holds nothing but the stack.

use log::debug;

/// What the controller should do after a screen returns.
pub enum Transition<C> {
    /// Run the same screen again.
    Stay,
    /// Push a new screen on top and run it.
    Push(Box<dyn Screen<C>>),
    /// Replace the current screen.
    Replace(Box<dyn Screen<C>>),
    /// Pop the current screen and resume the one below.
    Back,
    /// Unwind the whole stack.
    Quit,
}

/// An interactive screen. `run` keeps control until the screen wants to
/// navigate somewhere.
pub trait Screen<C> {
    fn name(&self) -> &str;

    fn run(&mut self, ctx: &mut C) -> Transition<C>;
}

/// Whether there is still something on the stack to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    Running,
    Finished,
}

pub struct FlowController<C> {
    stack: Vec<Box<dyn Screen<C>>>,
}

impl<C> Default for FlowController<C> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<C> FlowController<C> {
    pub fn new(root: Box<dyn Screen<C>>) -> Self {
        Self { stack: vec![root] }
    }

    /// Push `screen`; it is the next one to run.
    pub fn go_to(&mut self, screen: Box<dyn Screen<C>>) {
        debug!("Navigating to {} (depth {})", screen.name(), self.stack.len() + 1);
        self.stack.push(screen);
    }

    /// Pop the current screen. Popping the last one finishes the flow.
    pub fn go_back(&mut self) -> FlowStatus {
        if let Some(screen) = self.stack.pop() {
            debug!("Leaving {} (depth {})", screen.name(), self.stack.len());
        }
        self.status()
    }

    pub fn current_screen(&self) -> Option<&dyn Screen<C>> {
        self.stack.last().map(|s| s.as_ref())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn status(&self) -> FlowStatus {
        if self.stack.is_empty() {
            FlowStatus::Finished
        } else {
            FlowStatus::Running
        }
    }

    /// Apply one transition returned by the current screen.
    pub fn apply(&mut self, transition: Transition<C>) -> FlowStatus {
        match transition {
            Transition::Stay => {}
            Transition::Push(screen) => self.go_to(screen),
            Transition::Replace(screen) => {
                self.stack.pop();
                self.go_to(screen);
            }
            Transition::Back => {
                self.go_back();
            }
            Transition::Quit => {
                debug!("Quitting with {} screens on the stack", self.stack.len());
                self.stack.clear();
            }
        }
        self.status()
    }

    /// Run the top screen once and apply what it returns.
    pub fn step(&mut self, ctx: &mut C) -> FlowStatus {
        let transition = match self.stack.last_mut() {
            Some(screen) => screen.run(ctx),
            None => return FlowStatus::Finished,
        };
        self.apply(transition)
    }

    /// Drive screens until the stack is empty.
    pub fn run(&mut self, ctx: &mut C) {
        while self.step(ctx) == FlowStatus::Running {}
    }
}
