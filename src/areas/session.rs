use crate::areas::engine::LogWashingEngine;
use std::cell::{RefCell, RefMut};
use std::io::Write;

/// An engine bound to the writer commands print to
pub struct Session {
    engine: LogWashingEngine,
    writer: RefCell<Box<dyn Write>>,
    paint: bool,
}

impl Session {
    pub fn new(engine: LogWashingEngine, writer: Box<dyn Write>, paint: bool) -> Self {
        Session {
            engine,
            writer: RefCell::new(writer),
            paint,
        }
    }

    pub fn engine(&self) -> &LogWashingEngine {
        &self.engine
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn paint(&self) -> bool {
        self.paint
    }
}
