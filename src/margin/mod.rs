//! Margin policy and its display-only render envelope.

pub mod envelope;
pub mod policy;

pub use envelope::{to_margin_render_envelope, EnvelopeError, EnvelopeLine, MarginRenderEnvelope};
pub use policy::{ClampEvent, DealBand, LineCategory, MarginLine, MarginPolicy, MarginResult};
