//! Interpolated values

use std::fmt;

use tagml_dom::{Event, Fragment, Listener};
use tagml_html::HtmlSerializer;

/// A value interpolated into a template
#[derive(Debug)]
pub enum Value {
    /// Text or attribute value
    Str(String),
    /// Numeric value
    Number(Number),
    /// Event handler
    Callback(Listener),
    /// Pre-built nodes, e.g. the results of nested compiles
    Nodes(Vec<Fragment>),
    /// Nothing; inlines as the empty string
    Empty,
}

impl Value {
    /// Wrap a closure as an event handler
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&mut Event) + 'static,
    {
        Value::Callback(Listener::new(callback))
    }

    /// String form for attribute and text sites
    pub(crate) fn as_primitive(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// String form used when a value lands on an unclassified site
    pub fn to_inline_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Nodes(nodes) => {
                let serializer = HtmlSerializer::new();
                nodes.iter().map(|f| serializer.serialize_fragment(f)).collect()
            }
            Value::Callback(_) | Value::Empty => String::new(),
        }
    }
}

/// A number as it was supplied. Integers keep every digit; floats print
/// their shortest round-trip digits at their own precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    F32(f32),
    F64(f64),
}

/// Special values first, then the shortest `{:e}` digits of the magnitude
macro_rules! float_to_string {
    ($n:expr) => {{
        let n = $n;
        if n.is_nan() {
            "NaN".to_string()
        } else if n.is_infinite() {
            let name = if n < 0.0 { "-Infinity" } else { "Infinity" };
            name.to_string()
        } else if n == 0.0 {
            // -0 prints as 0
            "0".to_string()
        } else {
            place_decimal(n < 0.0, &format!("{:e}", n.abs()))
        }
    }};
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{n}"),
            Number::F32(n) => f.write_str(&float_to_string!(n)),
            Number::F64(n) => f.write_str(&float_to_string!(n)),
        }
    }
}

/// Lay out `d.ddde±x` digits like JavaScript's `Number.prototype.toString`:
/// plain decimal when the exponent is in `-7..21`, exponent form otherwise.
fn place_decimal(negative: bool, scientific: &str) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Decimal point position relative to the first digit
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-n) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = n - 1;
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.abs().to_string());
    }
    out
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::Int(i128::from(n)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Value::Number(Number::Int(n as i128))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::Int(n as i128))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(Number::F32(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::F64(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Listener> for Value {
    fn from(listener: Listener) -> Self {
        Value::Callback(listener)
    }
}

impl From<Fragment> for Value {
    fn from(fragment: Fragment) -> Self {
        Value::Nodes(vec![fragment])
    }
}

impl From<Vec<Fragment>> for Value {
    fn from(nodes: Vec<Fragment>) -> Self {
        Value::Nodes(nodes)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Empty, Into::into)
    }
}
