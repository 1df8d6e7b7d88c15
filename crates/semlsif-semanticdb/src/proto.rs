//! Hand-annotated prost messages for `semanticdb.proto`.
//!
//! Only the fields the indexer reads are modeled; the decoder skips the
//! rest of the schema (source text, diagnostics, synthetics, signatures).
//! Field tags match scalameta's `semanticdb.proto`.

/// A batch of documents as stored in one `.semanticdb` file.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TextDocuments {
    #[prost(message, repeated, tag = "1")]
    pub documents: Vec<TextDocument>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TextDocument {
    /// Repository-relative path of the source file.
    #[prost(string, tag = "2")]
    pub uri: String,
    #[prost(enumeration = "Language", tag = "10")]
    pub language: i32,
    #[prost(message, repeated, tag = "5")]
    pub symbols: Vec<SymbolInformation>,
    #[prost(message, repeated, tag = "6")]
    pub occurrences: Vec<SymbolOccurrence>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SymbolInformation {
    /// Opaque symbol key; keys starting with `local` are document-scoped.
    #[prost(string, tag = "1")]
    pub symbol: String,
    #[prost(string, tag = "5")]
    pub display_name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SymbolOccurrence {
    #[prost(message, optional, tag = "1")]
    pub range: Option<Range>,
    #[prost(string, tag = "2")]
    pub symbol: String,
    #[prost(enumeration = "Role", tag = "3")]
    pub role: i32,
}

impl SymbolOccurrence {
    /// The occurrence's range, or the zero range when absent.
    pub fn range(&self) -> Range {
        self.range.unwrap_or_default()
    }
}

/// Half-open source span, 0-based lines and characters.
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Range {
    #[prost(int32, tag = "1")]
    pub start_line: i32,
    #[prost(int32, tag = "2")]
    pub start_character: i32,
    #[prost(int32, tag = "3")]
    pub end_line: i32,
    #[prost(int32, tag = "4")]
    pub end_character: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Role {
    UnknownRole = 0,
    Reference = 1,
    Definition = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Language {
    UnknownLanguage = 0,
    Scala = 1,
    Java = 2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn role_accessor_maps_unknown_values_to_sentinel() {
        let mut occurrence = SymbolOccurrence {
            range: None,
            symbol: "a/B#".to_string(),
            role: Role::Definition as i32,
        };
        assert_eq!(occurrence.role(), Role::Definition);

        occurrence.role = 99;
        assert_eq!(occurrence.role(), Role::UnknownRole);
    }

    #[test]
    fn missing_range_decodes_as_zero_range() {
        let occurrence = SymbolOccurrence {
            range: None,
            symbol: "a/B#".to_string(),
            role: Role::Reference as i32,
        };
        let range = occurrence.range();
        assert_eq!(
            (
                range.start_line,
                range.start_character,
                range.end_line,
                range.end_character
            ),
            (0, 0, 0, 0)
        );
    }

    #[test]
    fn decode_skips_fields_we_do_not_model() {
        // Field 3 of TextDocument is the embedded source text, which this
        // model intentionally drops.
        #[derive(Clone, PartialEq, prost::Message)]
        struct FullDocument {
            #[prost(string, tag = "2")]
            uri: String,
            #[prost(string, tag = "3")]
            text: String,
            #[prost(message, repeated, tag = "6")]
            occurrences: Vec<SymbolOccurrence>,
        }

        let full = FullDocument {
            uri: "a.scala".to_string(),
            text: "object A".to_string(),
            occurrences: vec![SymbolOccurrence {
                range: Some(Range {
                    start_line: 0,
                    start_character: 7,
                    end_line: 0,
                    end_character: 8,
                }),
                symbol: "a/A.".to_string(),
                role: Role::Definition as i32,
            }],
        };

        let decoded = TextDocument::decode(full.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.uri, "a.scala");
        assert_eq!(decoded.occurrences.len(), 1);
        assert_eq!(decoded.occurrences[0].role(), Role::Definition);
        assert_eq!(decoded.occurrences[0].range().start_character, 7);
    }
}
