//! The feed protocol shared by every filter.

use super::{Coercion, FeedResult, Filter};
use crate::errors::ErrorCode;
use sift_value::Value;

pub(super) fn feed<F: Filter + ?Sized>(filter: &F, raw: Value) -> FeedResult {
    let common = filter.common();
    if raw.is_null() {
        return common.nils.resolve(raw, ErrorCode::NILS);
    }

    let coercion = if common.strict {
        strict(filter, raw)
    } else {
        filter.coerce(raw)
    };

    match coercion {
        Coercion::Invalid { raw, code } => common.invalid.resolve(raw, code),
        Coercion::Empty(value) => common.empty.resolve(value, ErrorCode::EMPTY),
        Coercion::Value(value) => match filter.validate(&value) {
            Some(code) => FeedResult::reject(value, code),
            None => filter.aggregate(value),
        },
    }
}

fn strict<F: Filter + ?Sized>(filter: &F, raw: Value) -> Coercion {
    if !filter.conforms(&raw) {
        Coercion::invalid(raw, filter.type_code())
    } else if filter.is_empty(&raw) {
        Coercion::Empty(raw)
    } else {
        Coercion::Value(raw)
    }
}
