use serde::{Deserialize, Serialize};

/// Closed set of column kinds the generated screens know how to edit.
///
/// Every SQL token maps to exactly one kind; tokens nobody recognises are
/// edited as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    Uuid,
    Json,
    Array,
}

impl FieldKind {
    pub const ALL: [FieldKind; 9] = [
        Self::Text,
        Self::Integer,
        Self::Decimal,
        Self::Boolean,
        Self::Date,
        Self::Timestamp,
        Self::Uuid,
        Self::Json,
        Self::Array,
    ];

    /// Classify a free-text SQL type token.
    pub fn classify(sql_type: &str) -> Self {
        let lower = sql_type.trim().to_lowercase();
        if lower.ends_with("[]") || lower.starts_with("array") {
            return Self::Array;
        }
        let base = lower.split('(').next().unwrap_or(&lower).trim();

        match base {
            "int" | "int2" | "int4" | "int8" | "integer" | "smallint" | "bigint" | "serial"
            | "smallserial" | "bigserial" => Self::Integer,

            "decimal" | "numeric" | "real" | "float" | "float4" | "float8" | "double"
            | "double precision" | "money" => Self::Decimal,

            "boolean" | "bool" => Self::Boolean,

            "date" => Self::Date,

            "timestamp" | "timestamptz" | "datetime" => Self::Timestamp,
            t if t.starts_with("timestamp") => Self::Timestamp,

            "uuid" => Self::Uuid,

            "json" | "jsonb" => Self::Json,

            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
            Self::Json => "json",
            Self::Array => "array",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_common_tokens() {
        assert_eq!(FieldKind::classify("varchar(255)"), FieldKind::Text);
        assert_eq!(FieldKind::classify("TEXT"), FieldKind::Text);
        assert_eq!(FieldKind::classify("integer"), FieldKind::Integer);
        assert_eq!(FieldKind::classify("BIGSERIAL"), FieldKind::Integer);
        assert_eq!(FieldKind::classify("decimal(10,2)"), FieldKind::Decimal);
        assert_eq!(FieldKind::classify("double precision"), FieldKind::Decimal);
        assert_eq!(FieldKind::classify("bool"), FieldKind::Boolean);
        assert_eq!(FieldKind::classify("date"), FieldKind::Date);
        assert_eq!(FieldKind::classify("timestamp with time zone"), FieldKind::Timestamp);
        assert_eq!(FieldKind::classify("timestamptz"), FieldKind::Timestamp);
        assert_eq!(FieldKind::classify("uuid"), FieldKind::Uuid);
        assert_eq!(FieldKind::classify("jsonb"), FieldKind::Json);
        assert_eq!(FieldKind::classify("text[]"), FieldKind::Array);
    }

    #[test]
    fn unknown_tokens_are_text() {
        assert_eq!(FieldKind::classify("geometry(Point, 4326)"), FieldKind::Text);
        assert_eq!(FieldKind::classify(""), FieldKind::Text);
    }

    #[test]
    fn numeric_kinds() {
        let numeric: Vec<_> = FieldKind::ALL.iter().filter(|k| k.is_numeric()).collect();
        assert_eq!(numeric, vec![&FieldKind::Integer, &FieldKind::Decimal]);
    }
}
