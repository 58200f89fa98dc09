use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that can be stored in a database row or used as query parameters.
///
/// ```rust
/// use sql_localstore::prelude::*;
///
/// let params: Vec<RowValues> = vec!["John".into(), 30.into(), RowValues::Null];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

macro_rules! row_value_from {
    ($($ty:ty => $variant:ident via $conv:expr),* $(,)?) => {
        $(
            impl From<$ty> for RowValues {
                fn from(value: $ty) -> Self {
                    RowValues::$variant($conv(value))
                }
            }
        )*
    };
}

row_value_from! {
    i64 => Int via std::convert::identity,
    i32 => Int via i64::from,
    u32 => Int via i64::from,
    f64 => Float via std::convert::identity,
    f32 => Float via f64::from,
    bool => Bool via std::convert::identity,
    String => Text via std::convert::identity,
    &str => Text via str::to_owned,
    NaiveDateTime => Timestamp via std::convert::identity,
    JsonValue => JSON via std::convert::identity,
    Vec<u8> => Blob via std::convert::identity,
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// Conversion into an ordered parameter list.
///
/// A single scalar becomes a one-element list; sequences keep their order.
pub trait IntoParams {
    fn into_params(self) -> Vec<RowValues>;
}

impl IntoParams for RowValues {
    fn into_params(self) -> Vec<RowValues> {
        vec![self]
    }
}

impl IntoParams for Vec<RowValues> {
    fn into_params(self) -> Vec<RowValues> {
        self
    }
}

impl IntoParams for &[RowValues] {
    fn into_params(self) -> Vec<RowValues> {
        self.to_vec()
    }
}

impl<const N: usize> IntoParams for [RowValues; N] {
    fn into_params(self) -> Vec<RowValues> {
        self.into_iter().collect()
    }
}

macro_rules! scalar_params {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoParams for $ty {
                fn into_params(self) -> Vec<RowValues> {
                    vec![RowValues::from(self)]
                }
            }
        )*
    };
}

scalar_params!(i64, i32, u32, f64, f32, bool, String, &str, NaiveDateTime, JsonValue);

/// Population status of a [`LazyResultView`](crate::results::LazyResultView).
///
/// The numeric codes are stable and can be stored or compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum Status {
    /// No rows delivered yet.
    #[default]
    Empty = 0x0100,
    /// Rows delivered; terminal.
    Ready = 0x0200,
}

impl Status {
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_params_become_single_element_lists() {
        assert_eq!("John".into_params(), vec![RowValues::Text("John".into())]);
        assert_eq!(30_i64.into_params(), vec![RowValues::Int(30)]);
    }

    #[test]
    fn option_none_is_null() {
        let value: RowValues = Option::<i64>::None.into();
        assert!(value.is_null());
        assert_eq!(RowValues::from(Some(3_i64)), RowValues::Int(3));
    }

    #[test]
    fn accessors_read_stored_representations() {
        assert_eq!(RowValues::Int(1).as_bool(), Some(&true));
        assert_eq!(RowValues::Int(0).as_bool(), Some(&false));
        assert_eq!(RowValues::Int(2).as_bool(), None);

        let whole = RowValues::from("2024-03-01 12:30:45").as_timestamp();
        let fractional = RowValues::from("2024-03-01 12:30:45.250").as_timestamp();
        assert_eq!(whole.map(|ts| ts.to_string()).as_deref(), Some("2024-03-01 12:30:45"));
        assert_eq!(
            fractional.map(|ts| ts.to_string()).as_deref(),
            Some("2024-03-01 12:30:45.250")
        );
        assert_eq!(RowValues::from("yesterday").as_timestamp(), None);

        assert_eq!(RowValues::Float(0.5).as_float(), Some(0.5));
        assert_eq!(RowValues::Blob(vec![1, 2]).as_blob(), Some(&[1_u8, 2][..]));
        assert_eq!(RowValues::Null.as_blob(), None);
    }

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(Status::Empty.code(), 256);
        assert_eq!(Status::Ready.code(), 512);
        assert_eq!(Status::default(), Status::Empty);
    }
}
