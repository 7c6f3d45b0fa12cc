//! Accordion selection state machine

/// Which card, if any, is expanded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Accordion {
    #[default]
    Closed,
    Open(usize),
}

/// The effect of one header activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// Card that collapsed
    pub closed: Option<usize>,
    /// Card that expanded
    pub opened: Option<usize>,
}

impl Accordion {
    /// Index of the open card
    pub fn open_index(&self) -> Option<usize> {
        match self {
            Accordion::Closed => None,
            Accordion::Open(index) => Some(*index),
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open_index() == Some(index)
    }

    /// Activate the header of card `index`
    ///
    /// The open card closes; any other card opens and replaces whatever was open.
    pub fn toggle(&mut self, index: usize) -> Transition {
        match *self {
            Accordion::Open(current) if current == index => {
                *self = Accordion::Closed;
                Transition { closed: Some(index), opened: None }
            }
            Accordion::Open(current) => {
                *self = Accordion::Open(index);
                Transition { closed: Some(current), opened: Some(index) }
            }
            Accordion::Closed => {
                *self = Accordion::Open(index);
                Transition { closed: None, opened: Some(index) }
            }
        }
    }

    /// Collapse everything
    pub fn close(&mut self) -> Option<usize> {
        let closed = self.open_index();
        *self = Accordion::Closed;
        closed
    }
}
