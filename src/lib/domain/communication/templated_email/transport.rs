//! Debug/production transport switch

use std::sync::Arc;

use crate::domain::communication::mailer::Mailer;

/// Which transport a send goes through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportChoice {
    /// Write to the debug storage
    Debug,

    /// Hand to the production mailer
    Production,
}

impl TransportChoice {
    /// Maps the debug flag to a transport
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            Self::Debug
        } else {
            Self::Production
        }
    }
}

/// Picks the debug sink or the production mailer from a flag fixed at construction
#[derive(Debug)]
pub struct TransportSelector<M, D> {
    debug: bool,
    debug_sink: Arc<D>,
    production: Arc<M>,
}

impl<M, D> TransportSelector<M, D>
where
    M: Mailer,
    D: Mailer,
{
    /// Creates a new selector
    ///
    /// # Arguments
    /// * `debug` - Send through `debug_sink` instead of `production`.
    /// * `debug_sink` - The mailer used in debug mode.
    /// * `production` - The mailer used otherwise.
    pub fn new(debug: bool, debug_sink: Arc<D>, production: Arc<M>) -> Self {
        Self {
            debug,
            debug_sink,
            production,
        }
    }

    /// The transport the next send goes through
    pub fn choice(&self) -> TransportChoice {
        TransportChoice::from_debug_flag(self.debug)
    }

    /// The mailer matching [`Self::choice`]
    pub fn select(&self) -> &dyn Mailer {
        match self.choice() {
            TransportChoice::Debug => self.debug_sink.as_ref(),
            TransportChoice::Production => self.production.as_ref(),
        }
    }
}
