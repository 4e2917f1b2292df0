//! Dotted version comparison and version-threshold tables.
//!
//! Pandoc versions are plain dot-separated integers ("2.17.1.1"), often with
//! four components, so they are compared segment by segment rather than as
//! semver.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

impl Comparison {
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Less => ordering == Ordering::Less,
            Comparison::LessOrEqual => ordering != Ordering::Greater,
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::GreaterOrEqual => ordering != Ordering::Less,
            Comparison::Greater => ordering == Ordering::Greater,
        }
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Comparison::Less),
            "<=" => Ok(Comparison::LessOrEqual),
            "=" | "==" => Ok(Comparison::Equal),
            ">=" => Ok(Comparison::GreaterOrEqual),
            ">" => Ok(Comparison::Greater),
            other => Err(format!("Unknown comparison operator '{}'", other)),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Greater => ">",
        };
        f.write_str(op)
    }
}

/// Numeric value of one version segment: its leading ASCII digits, or zero
/// when there are none. Overflow saturates.
fn segment_value(segment: &str) -> u64 {
    segment
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c as u8 - b'0'))
        })
}

fn segments(version: &str) -> Vec<u64> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    trimmed.split('.').map(segment_value).collect()
}

/// Orders two versions component-wise; missing trailing components are zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = segments(a);
    let b = segments(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }

    Ordering::Equal
}

pub fn compare(a: &str, b: &str, op: Comparison) -> bool {
    op.holds(compare_versions(a, b))
}

/// One row of a version-threshold table: `value` applies when
/// `version <op> bound` holds.
#[derive(Debug, Clone, Copy)]
pub struct VersionRule<T: 'static> {
    pub op: Comparison,
    pub bound: &'static str,
    pub value: T,
}

/// First matching rule wins; `default` covers versions no rule matches.
pub fn select<T: Copy>(rules: &[VersionRule<T>], version: &str, default: T) -> T {
    rules
        .iter()
        .find(|rule| compare(version, rule.bound, rule.op))
        .map(|rule| rule.value)
        .unwrap_or(default)
}
