use super::{Coercion, Filter};
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, DuckOptions};
use sift_value::Value;

/// Accepts any value that answers every configured capability.
#[derive(Debug, Clone, Default)]
pub struct DuckFilter {
    options: DuckOptions,
}

impl DuckFilter {
    #[must_use]
    pub const fn new(options: DuckOptions) -> Self {
        Self { options }
    }
}

impl Filter for DuckFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Duck
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::MISSING_CAPABILITY
    }

    fn coerce(&self, raw: Value) -> Coercion {
        if self.conforms(&raw) {
            Coercion::Value(raw)
        } else {
            Coercion::invalid(raw, ErrorCode::MISSING_CAPABILITY)
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        self.options
            .capabilities
            .iter()
            .all(|capability| value.has_capability(capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FeedResult;
    use sift_value::{Host, HostObject};

    #[derive(Debug)]
    struct Quacker;

    impl HostObject for Quacker {
        fn type_name(&self) -> &str {
            "Quacker"
        }

        fn has_capability(&self, capability: &str) -> bool {
            capability == "quack"
        }
    }

    fn duck(capabilities: &[&str]) -> DuckFilter {
        let mut options = DuckOptions::default();
        options.capabilities = capabilities.iter().map(ToString::to_string).collect();
        DuckFilter::new(options)
    }

    #[test]
    fn hosts_answer_their_own_capabilities() {
        let filter = duck(&["quack"]);
        assert!(filter.feed(Value::Host(Host::new(Quacker))).is_accepted());
        assert_eq!(
            filter.feed(Value::from("duck")),
            FeedResult::reject(Value::from("duck"), ErrorCode::MISSING_CAPABILITY)
        );
    }

    #[test]
    fn built_in_values_answer_structural_capabilities() {
        let filter = duck(&["len", "iter"]);
        assert!(filter.feed(Value::List(vec![])).is_accepted());
        assert!(!filter.feed(Value::from("abc")).is_accepted());
    }

    #[test]
    fn no_capabilities_accepts_anything_present() {
        assert!(duck(&[]).feed(Value::from(1)).is_accepted());
    }
}
