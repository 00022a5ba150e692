//! Checkout
//!
//! Resolves how payments are taken on the current platform and drives a
//! single checkout attempt against the cart.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::payments::PaymentCapability;

pub mod attempt;
pub mod coordinator;

pub use attempt::{AttemptOutcome, PaymentAttempt};
pub use coordinator::{CheckoutCoordinator, CheckoutError, CheckoutPhase};

/// Runtime the storefront is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    /// Browser build; the native payment SDK cannot be embedded.
    Web,

    /// iOS build.
    Ios,

    /// Android build.
    Android,
}

impl Platform {
    /// Whether the platform can host the native payment SDK.
    pub fn is_native(self) -> bool {
        !matches!(self, Platform::Web)
    }
}

/// How checkout behaves, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMode {
    /// Demo checkout that always succeeds without taking payment.
    WebDemo,

    /// Native checkout with a loaded payment capability.
    NativeLive,

    /// Native checkout where the payment capability failed to load.
    NativeUnavailable,
}

impl PlatformMode {
    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformMode::WebDemo => "web_demo",
            PlatformMode::NativeLive => "native_live",
            PlatformMode::NativeUnavailable => "native_unavailable",
        }
    }
}

impl fmt::Display for PlatformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment backend available to the checkout coordinator.
#[derive(Clone)]
pub enum PaymentBackend {
    /// No payment is taken; see [`PlatformMode::WebDemo`].
    WebDemo,

    /// Payments are submitted to the given capability.
    NativeLive(Arc<dyn PaymentCapability>),

    /// The capability could not be loaded; checkout reports unavailable.
    NativeUnavailable,
}

impl PaymentBackend {
    /// Resolve the backend for a platform and the capability loaded at startup, if any.
    pub fn resolve(platform: Platform, capability: Option<Arc<dyn PaymentCapability>>) -> Self {
        let backend = match (platform.is_native(), capability) {
            (false, capability) => {
                if capability.is_some() {
                    debug!("ignoring payment capability on web platform");
                }

                PaymentBackend::WebDemo
            }
            (true, Some(capability)) => PaymentBackend::NativeLive(capability),
            (true, None) => PaymentBackend::NativeUnavailable,
        };

        debug!(?platform, mode = %backend.mode(), "resolved payment backend");

        backend
    }

    /// The mode this backend runs checkout in.
    pub fn mode(&self) -> PlatformMode {
        match self {
            PaymentBackend::WebDemo => PlatformMode::WebDemo,
            PaymentBackend::NativeLive(_) => PlatformMode::NativeLive,
            PaymentBackend::NativeUnavailable => PlatformMode::NativeUnavailable,
        }
    }
}

impl fmt::Debug for PaymentBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentBackend::WebDemo => f.write_str("WebDemo"),
            PaymentBackend::NativeLive(_) => f.debug_tuple("NativeLive").field(&"..").finish(),
            PaymentBackend::NativeUnavailable => f.write_str("NativeUnavailable"),
        }
    }
}
