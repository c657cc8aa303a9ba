//! Validity predicates applied to every raw sub-value before comparison.

use std::borrow::Cow;

use froggy_common::parse_code;
use froggy_model::CellValue;

/// The finite number held by `cell`, or `None` if it is not a valid number.
pub fn valid_number(cell: &CellValue) -> Option<f64> {
    cell.as_number()
}

/// Non-empty, non-sentinel text of `cell`.
pub fn valid_text(cell: &CellValue) -> Option<Cow<'_, str>> {
    cell.as_text().filter(|text| !text.is_empty())
}

/// Integer code held by `cell`; `2.0` counts as `2`, `2.5` does not.
pub fn valid_code(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Blank | CellValue::Missing => None,
        CellValue::Number(value) => {
            (value.is_finite() && value.fract() == 0.0).then_some(*value as i64)
        }
        CellValue::Text(text) => parse_code(text),
    }
}
