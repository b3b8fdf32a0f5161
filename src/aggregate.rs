//! Volume and open-interest sums over chain rows.

use serde_json::Value;

use crate::types::quote::OptionRow;

/// Call/put pair accumulated across a chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallPutTotals {
    pub call: i64,
    pub put: i64,
}

/// Sum `c_Volume` / `p_Volume` across rows.
pub fn sum_volumes(rows: &[OptionRow]) -> CallPutTotals {
    sum_pairs(rows, |r| (r.call_volume.as_ref(), r.put_volume.as_ref()))
}

/// Sum `c_OpenInterest` / `p_OpenInterest` across rows.
pub fn sum_open_interest(rows: &[OptionRow]) -> CallPutTotals {
    sum_pairs(rows, |r| {
        (r.call_open_interest.as_ref(), r.put_open_interest.as_ref())
    })
}

fn sum_pairs<F>(rows: &[OptionRow], fields: F) -> CallPutTotals
where
    F: Fn(&OptionRow) -> (Option<&Value>, Option<&Value>),
{
    rows.iter().fold(CallPutTotals::default(), |acc, row| {
        let (call, put) = fields(row);
        CallPutTotals {
            call: acc.call + count(call),
            put: acc.put + count(put),
        }
    })
}

/// Parse one cell. Strings lose their thousands separators and are read up
/// to the first non-digit; JSON numbers are truncated. Anything else is 0.
fn count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::String(s)) => parse_leading_int(&s.replace(',', "")),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let n = digits[..end].parse::<i64>().unwrap_or(0);
    if negative { -n } else { n }
}
