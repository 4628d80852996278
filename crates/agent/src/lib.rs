//! Voice agent provisioning boundary.
//!
//! The negotiation core never talks to the hosted voice platform; this crate
//! owns that seam. A `VoiceAgentProvisioner` submits an `AgentBlueprint` to
//! the Omnidimension API once at startup and hands back an opaque agent id.
//! When no API key is configured, the no-op implementation stands in with a
//! fixed mock id, so callers never branch on client availability themselves.

pub mod blueprint;
pub mod omnidim;
pub mod provisioner;

pub use blueprint::AgentBlueprint;
pub use omnidim::OmnidimensionProvisioner;
pub use provisioner::{AgentId, NoopProvisioner, ProvisionError, VoiceAgentProvisioner};
