use super::{Children, Coercion, FeedResult, Filter};
use crate::errors::{ErrorCode, ErrorMap, ErrorNode};
use crate::kind::FilterKind;
use crate::options::{CommonOptions, MapOptions};
use indexmap::IndexMap;
use sift_value::{Map, Value};
use std::sync::Arc;

/// A map with named children.
///
/// Only declared keys are read; anything else in the input is dropped.
/// Absent keys go through the child's `missing` policy. A failing child
/// contributes to the error map and nothing to the output.
#[derive(Debug, Clone)]
pub struct MapFilter {
    options: MapOptions,
    fields: IndexMap<String, Arc<dyn Filter>>,
}

impl MapFilter {
    #[must_use]
    pub fn new(options: MapOptions, fields: IndexMap<String, Arc<dyn Filter>>) -> Self {
        Self { options, fields }
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Arc<dyn Filter>> {
        &self.fields
    }

    /// Feeds every declared field from `data`.
    pub(crate) fn feed_fields(&self, mut data: Map) -> (Map, ErrorMap) {
        let mut inputs = Map::with_capacity(self.fields.len());
        let mut errors = ErrorMap::new();
        for (key, field) in &self.fields {
            let result = match data.shift_remove(key) {
                Some(raw) => field.feed(raw),
                None => field.feed_missing(),
            };
            match result {
                FeedResult::Accepted(value) => {
                    inputs.insert(key.clone(), value);
                }
                FeedResult::Rejected { error, .. } => errors.insert(key.as_str(), error.keyed(key)),
                FeedResult::Discarded => {}
            }
        }
        (inputs, errors)
    }
}

impl Filter for MapFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Map
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_A_MAP
    }

    fn coerce(&self, raw: Value) -> Coercion {
        match raw {
            Value::Map(_) => Coercion::Value(raw),
            Value::Host(ref host) => match host.object().entries() {
                Some(entries) => Coercion::Value(Value::Map(entries)),
                None => Coercion::invalid(raw, ErrorCode::NOT_A_MAP),
            },
            other => Coercion::invalid(other, ErrorCode::NOT_A_MAP),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Map(_))
    }

    fn aggregate(&self, value: Value) -> FeedResult {
        let Value::Map(data) = value else {
            return FeedResult::reject(value, ErrorCode::NOT_A_MAP);
        };
        let (inputs, errors) = self.feed_fields(data);
        if errors.is_empty() {
            FeedResult::Accepted(Value::Map(inputs))
        } else {
            FeedResult::Rejected {
                value: Value::Map(inputs),
                error: ErrorNode::Map(errors),
            }
        }
    }

    fn children(&self) -> Children<'_> {
        Children::Fields(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{IntegerFilter, StringFilter};
    use crate::options::{IntegerOptions, StringOptions};
    use crate::policy::Policy;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sift_value::{Host, HostObject};

    fn person() -> MapFilter {
        let mut fields: IndexMap<String, Arc<dyn Filter>> = IndexMap::new();
        fields.insert(
            "name".into(),
            Arc::new(StringFilter::new(StringOptions::default()).unwrap()),
        );
        let mut age = IntegerOptions::default();
        age.common.missing = Policy::Discard;
        fields.insert("age".into(), Arc::new(IntegerFilter::new(age)));
        MapFilter::new(MapOptions::default(), fields)
    }

    #[test]
    fn reads_declared_keys_only() {
        let result = person().feed(Value::from(json!({"name": "Ada", "age": "36", "admin": true})));
        assert_eq!(
            result,
            FeedResult::Accepted(Value::from(json!({"name": "Ada", "age": 36})))
        );
    }

    #[test]
    fn missing_keys_follow_missing_policy() {
        let result = person().feed(Value::from(json!({"age": 1})));
        let FeedResult::Rejected { value, error } = result else {
            panic!("expected a rejection");
        };
        assert_eq!(value, Value::from(json!({"age": 1})));
        let atom = error
            .as_map()
            .and_then(|errors| errors.get("name"))
            .and_then(ErrorNode::as_atom)
            .unwrap();
        assert_eq!(atom.code, ErrorCode::REQUIRED);
        assert_eq!(atom.key.as_deref(), Some("name"));

        assert_eq!(
            person().feed(Value::from(json!({"name": "Ada"}))),
            FeedResult::Accepted(Value::from(json!({"name": "Ada"})))
        );
    }

    #[test]
    fn failing_children_are_not_written() {
        let result = person().feed(Value::from(json!({"name": "Ada", "age": "old"})));
        let FeedResult::Rejected { value, error } = result else {
            panic!("expected a rejection");
        };
        assert_eq!(value, Value::from(json!({"name": "Ada"})));
        assert_eq!(error.len(), 1);
    }

    #[derive(Debug)]
    struct Record;

    impl HostObject for Record {
        fn type_name(&self) -> &str {
            "Record"
        }

        fn entries(&self) -> Option<Map> {
            let mut map = Map::new();
            map.insert("name".into(), Value::from("Host"));
            Some(map)
        }
    }

    #[test]
    fn hosts_with_entries_are_maps() {
        assert_eq!(
            person().feed(Value::Host(Host::new(Record))),
            FeedResult::Accepted(Value::from(json!({"name": "Host"})))
        );
        assert_eq!(
            person().feed(Value::from("Ada")),
            FeedResult::reject(Value::from("Ada"), ErrorCode::NOT_A_MAP)
        );
    }
}
