//! Error enum generator shared by the provider ports.
//!
//! Every provider can fail in the same five ways (transport, timeout,
//! throttling, undecodable response, rejected request), so the macro emits
//! those variants for each port and lets a port append its own. All variants
//! carry a single `message` and get a snake-case constructor accepting
//! `impl Into<String>`, which is what the adapters' failure mapping calls.

macro_rules! define_port_error {
    (@constructors $($variant:ident)*) => {
        ::paste::paste! {
            $(
                #[doc = "Build a [`Self::" $variant "`] failure."]
                pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                    Self::$variant {
                        message: message.into(),
                    }
                }
            )*
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident for $subject:literal {
            $(
                $(#[$extra_meta:meta])*
                $extra:ident => $extra_message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// Network transport failed or the provider answered 5xx.
            #[error("{subject} transport failed: {message}", subject = $subject)]
            Transport {
                /// Failure description.
                message: String,
            },
            /// The call exceeded its timeout.
            #[error("{subject} timeout: {message}", subject = $subject)]
            Timeout {
                /// Failure description.
                message: String,
            },
            /// The provider throttled or refused the caller.
            #[error("{subject} rate limited request: {message}", subject = $subject)]
            RateLimited {
                /// Failure description.
                message: String,
            },
            /// The response body could not be decoded.
            #[error("{subject} response decode failed: {message}", subject = $subject)]
            Decode {
                /// Failure description.
                message: String,
            },
            /// The provider rejected the request as malformed.
            #[error("{subject} request invalid: {message}", subject = $subject)]
            InvalidRequest {
                /// Failure description.
                message: String,
            },
            $(
                $(#[$extra_meta])*
                #[error($extra_message)]
                $extra {
                    /// Failure description.
                    message: String,
                },
            )*
        }

        impl $name {
            define_port_error!(
                @constructors Transport Timeout RateLimited Decode InvalidRequest $($extra)*
            );

            /// Whether the provider call ran out of time.
            pub fn is_timeout(&self) -> bool {
                matches!(self, Self::Timeout { .. })
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Port error used only to exercise the generator.
        pub enum ProbeError for "probe" {
            /// Port-specific failure.
            Closed => "probe closed: {message}",
        }
    }

    #[test]
    fn shared_variants_carry_the_subject() {
        assert_eq!(
            ProbeError::transport("connection reset").to_string(),
            "probe transport failed: connection reset"
        );
        assert_eq!(
            ProbeError::invalid_request("bad bbox").to_string(),
            "probe request invalid: bad bbox"
        );
    }

    #[test]
    fn extra_variants_get_constructors() {
        let err = ProbeError::closed(String::from("maintenance"));
        assert_eq!(
            err,
            ProbeError::Closed {
                message: "maintenance".to_owned()
            }
        );
        assert_eq!(err.to_string(), "probe closed: maintenance");
    }

    #[test]
    fn only_timeouts_report_as_timeouts() {
        assert!(ProbeError::timeout("30s").is_timeout());
        assert!(!ProbeError::rate_limited("429").is_timeout());
        assert!(!ProbeError::closed("gone").is_timeout());
    }
}
