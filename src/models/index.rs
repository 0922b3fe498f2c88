// file: src/models/index.rs
// description: index definition sent verbatim to the service
// reference: Azure AI Search REST index schema

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// EDM type name of a field, e.g. `Edm.String` or `Collection(Edm.String)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchFieldDataType(Cow<'static, str>);

impl SearchFieldDataType {
    pub const STRING: Self = Self(Cow::Borrowed("Edm.String"));
    pub const INT32: Self = Self(Cow::Borrowed("Edm.Int32"));
    pub const INT64: Self = Self(Cow::Borrowed("Edm.Int64"));
    pub const DOUBLE: Self = Self(Cow::Borrowed("Edm.Double"));
    pub const BOOLEAN: Self = Self(Cow::Borrowed("Edm.Boolean"));
    pub const DATE_TIME_OFFSET: Self = Self(Cow::Borrowed("Edm.DateTimeOffset"));
    pub const GEOGRAPHY_POINT: Self = Self(Cow::Borrowed("Edm.GeographyPoint"));

    pub fn collection(element: &SearchFieldDataType) -> Self {
        Self(Cow::Owned(format!("Collection({})", element.0)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchFieldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchField {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: SearchFieldDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facetable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrievable: Option<bool>,
}

impl SearchField {
    pub fn new(name: impl Into<String>, data_type: SearchFieldDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            key: None,
            searchable: None,
            filterable: None,
            sortable: None,
            facetable: None,
            retrievable: None,
        }
    }

    pub fn key(mut self) -> Self {
        self.key = Some(true);
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = Some(true);
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = Some(true);
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = Some(true);
        self
    }

    pub fn facetable(mut self) -> Self {
        self.facetable = Some(true);
        self
    }

    pub fn retrievable(mut self) -> Self {
        self.retrievable = Some(true);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub name: String,
    pub fields: Vec<SearchField>,
    #[serde(rename = "@odata.etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl SearchIndex {
    pub fn new(name: impl Into<String>, fields: Vec<SearchField>) -> Self {
        Self {
            name: name.into(),
            fields,
            etag: None,
        }
    }

    /// Two-field schema used by the demo: a filterable, sortable `id` key and
    /// a searchable `title`.
    pub fn sample(name: impl Into<String>) -> Self {
        Self::new(
            name,
            vec![
                SearchField::new("id", SearchFieldDataType::STRING)
                    .key()
                    .filterable()
                    .sortable()
                    .retrievable(),
                SearchField::new("title", SearchFieldDataType::STRING)
                    .searchable()
                    .retrievable(),
            ],
        )
    }

    pub fn key_field(&self) -> Option<&SearchField> {
        self.fields.iter().find(|f| f.key == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sample_index_wire_shape() {
        let index = SearchIndex::sample("sample-index");
        let value = serde_json::to_value(&index).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "sample-index",
                "fields": [
                    {
                        "name": "id",
                        "type": "Edm.String",
                        "key": true,
                        "filterable": true,
                        "sortable": true,
                        "retrievable": true
                    },
                    {
                        "name": "title",
                        "type": "Edm.String",
                        "searchable": true,
                        "retrievable": true
                    }
                ]
            })
        );
    }

    #[test]
    fn test_parses_service_response_with_extra_properties() {
        let body = json!({
            "@odata.context": "https://svc/$metadata#indexes/$entity",
            "@odata.etag": "\"0x8DC\"",
            "name": "hotels",
            "fields": [
                {"name": "tags", "type": "Collection(Edm.String)", "searchable": true, "analyzer": null}
            ],
            "scoringProfiles": []
        });

        let index: SearchIndex = serde_json::from_value(body).unwrap();
        assert_eq!(index.name, "hotels");
        assert_eq!(index.etag.as_deref(), Some("\"0x8DC\""));
        assert_eq!(
            index.fields[0].data_type,
            SearchFieldDataType::collection(&SearchFieldDataType::STRING)
        );
        assert!(index.key_field().is_none());
    }

    #[test]
    fn test_key_field_lookup() {
        let index = SearchIndex::sample("x");
        assert_eq!(index.key_field().map(|f| f.name.as_str()), Some("id"));
    }
}
