use crate::{Error, Result};

macro_rules! jdbc_types {
    ( $( $variant:ident => $name:literal, )* ) => {
        /// Column type as declared in a mapper document.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum JdbcType {
            $( $variant, )*
        }

        impl JdbcType {
            pub fn name(self) -> &'static str {
                match self {
                    $( JdbcType::$variant => $name, )*
                }
            }
        }

        impl core::str::FromStr for JdbcType {
            type Err = Error;

            fn from_str(s: &str) -> Result<JdbcType> {
                match s {
                    $( $name => Ok(JdbcType::$variant), )*
                    _ => Err(Error::invalid_mapping(format!(
                        "Error resolving JdbcType. Cause: unknown JDBC type '{s}'"
                    ))),
                }
            }
        }
    };
}

jdbc_types! {
    Array => "ARRAY",
    Bit => "BIT",
    TinyInt => "TINYINT",
    SmallInt => "SMALLINT",
    Integer => "INTEGER",
    BigInt => "BIGINT",
    Float => "FLOAT",
    Real => "REAL",
    Double => "DOUBLE",
    Numeric => "NUMERIC",
    Decimal => "DECIMAL",
    Char => "CHAR",
    VarChar => "VARCHAR",
    LongVarChar => "LONGVARCHAR",
    Date => "DATE",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
    Binary => "BINARY",
    VarBinary => "VARBINARY",
    LongVarBinary => "LONGVARBINARY",
    Null => "NULL",
    Other => "OTHER",
    Blob => "BLOB",
    Clob => "CLOB",
    Boolean => "BOOLEAN",
    Cursor => "CURSOR",
    Undefined => "UNDEFINED",
    NVarChar => "NVARCHAR",
    NChar => "NCHAR",
    NClob => "NCLOB",
    Struct => "STRUCT",
    JavaObject => "JAVA_OBJECT",
    Distinct => "DISTINCT",
    Ref => "REF",
    DataLink => "DATALINK",
    RowId => "ROWID",
    LongNVarChar => "LONGNVARCHAR",
    SqlXml => "SQLXML",
    DateTimeOffset => "DATETIMEOFFSET",
    TimeWithTimezone => "TIME_WITH_TIMEZONE",
    TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
}

impl JdbcType {
    /// Parses an optional `jdbcType` attribute.
    pub fn resolve(name: Option<&str>) -> Result<Option<JdbcType>> {
        name.map(str::parse).transpose()
    }
}

impl core::fmt::Display for JdbcType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
