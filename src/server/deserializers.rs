use serde::{Deserialize, Deserializer};

// the frontend is not consistent about ids, sometimes they come as numbers,
// sometimes as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    fn into_i64<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            NumberOrString::Number(n) => Ok(Some(n)),
            NumberOrString::String(s) if s.trim().is_empty() => Ok(None),
            NumberOrString::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("Wrong value {s}, can not parse to i64"))),
        }
    }
}

pub fn first_page() -> i64 {
    1
}

// `?page=abc` falls back to the first page instead of failing the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(first_page))
}

/// Number or numeric string; `null` and `""` read as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(value) => value.into_i64(),
        None => Ok(None),
    }
}

/// List of ids; `null` and an empty object read as no ids at all.
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdList {
        List(Vec<NumberOrString>),
        Empty {},
    }

    match Option::<IdList>::deserialize(deserializer)? {
        Some(IdList::List(ids)) => {
            let mut out = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(id) = id.into_i64::<D::Error>()? {
                    out.push(id);
                }
            }
            Ok(out)
        }
        Some(IdList::Empty {}) | None => Ok(Vec::new()),
    }
}
