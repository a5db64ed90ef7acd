//! Page layout as exported by the document-analysis service.
//!
//! Only the parts needed to position text are modelled: the page-wide text
//! buffer, and for every block its bounding polygon and the span of the
//! buffer it covers.

use std::io::Read;

use serde::{de, Deserialize, Deserializer};

use crate::{Error, Result, Token};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    pub text: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    pub layout: Option<Layout>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub text_anchor: Option<TextAnchor>,
    pub bounding_poly: Option<BoundingPoly>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnchor {
    #[serde(default)]
    pub text_segments: Vec<TextSegment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    #[serde(default, deserialize_with = "deserialize_index")]
    pub start_index: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_index")]
    pub end_index: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    #[serde(default)]
    pub normalized_vertices: Vec<Vertex>,
}

// Zero coordinates are omitted from the export.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Indices are int64 and therefore exported as strings, but plain numbers
/// show up in hand-written fixtures.
fn deserialize_index<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Index {
        Number(usize),
        Text(String),
    }

    match Option::<Index>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Index::Number(index)) => Ok(Some(index)),
        Some(Index::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

impl Document {
    pub fn from_json<S: AsRef<str>>(s: S) -> Result<Self> {
        Ok(serde_json::from_str(s.as_ref())?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Flattens the blocks of one page into positioned tokens, in block order.
    ///
    /// Any block that cannot be positioned fails the whole page.
    pub fn tokens(&self, page_index: usize) -> Result<Vec<Token>> {
        let text = self
            .text
            .as_deref()
            .ok_or_else(|| Error::MalformedInput("document has no text".into()))?;

        let page = self
            .pages
            .get(page_index)
            .ok_or_else(|| Error::MalformedInput(format!("document has no page {page_index}")))?;

        // Spans count characters, so slicing needs char boundaries.
        let boundaries = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain([text.len()])
            .collect::<Vec<_>>();

        page.blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| block.to_token(text, &boundaries, idx))
            .collect()
    }
}

impl Block {
    fn to_token(&self, text: &str, boundaries: &[usize], idx: usize) -> Result<Token> {
        let malformed = |what: &str| Error::MalformedInput(format!("block {idx}: {what}"));

        let layout = self.layout.as_ref().ok_or_else(|| malformed("missing layout"))?;

        let vertices = layout
            .bounding_poly
            .as_ref()
            .map(|poly| poly.normalized_vertices.as_slice())
            .filter(|vertices| !vertices.is_empty())
            .ok_or_else(|| malformed("missing bounding polygon"))?;

        let segment = layout
            .text_anchor
            .as_ref()
            .and_then(|anchor| anchor.text_segments.first())
            .ok_or_else(|| malformed("missing text segment"))?;

        let start = segment.start_index.unwrap_or(0);
        let end = segment
            .end_index
            .ok_or_else(|| malformed("text segment has no end index"))?;

        if start > end || end >= boundaries.len() {
            return Err(malformed(&format!("text segment {start}..{end} out of range")));
        }

        let (min_x, max_x, min_y, max_y) = vertices.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_y, max_y), v| {
                (min_x.min(v.x), max_x.max(v.x), min_y.min(v.y), max_y.max(v.y))
            },
        );

        Ok(Token {
            text: text[boundaries[start]..boundaries[end]].trim().to_string(),
            cx: (min_x + max_x) / 2.0,
            cy: (min_y + max_y) / 2.0,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}
