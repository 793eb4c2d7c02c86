//! Persisted layer cache (`.lyr` files).
//!
//! One line per vertex, `<id> <order> <layer>`, in vertex insertion order. Ids holding
//! whitespace or quote characters are written between double quotes with `\` escapes. When a
//! document has a cache next to it, the ranker and orderer do not run at all.

use crate::error::{Error, Result};
use quilt_graph::{Network, VertexIx};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CACHE_EXTENSION: &str = "lyr";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheReport {
    /// Vertices that received a layer and an order.
    pub applied: usize,
    /// Ids in the cache that are not in the network.
    pub unknown: Vec<String>,
}

/// `family.ged` -> `family.lyr`; a path without extension just gains one.
pub fn cache_path_for(document: &Path) -> PathBuf {
    document.with_extension(CACHE_EXTENSION)
}

fn needs_quotes(id: &str) -> bool {
    id.is_empty() || id.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\')
}

fn quote_id(id: &str) -> String {
    if !needs_quotes(id) {
        return id.to_string();
    }
    let mut out = String::with_capacity(id.len() + 2);
    out.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Splits the leading id off `line` and returns it with the rest of the line.
fn split_id(line: &str) -> std::result::Result<(String, &str), String> {
    let Some(quoted) = line.strip_prefix('"') else {
        let end = line.find(char::is_whitespace).unwrap_or(line.len());
        return Ok((line[..end].to_string(), &line[end..]));
    };

    let mut id = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => id.push(escaped),
                None => return Err("dangling escape in quoted id".to_string()),
            },
            '"' => return Ok((id, &quoted[i + 1..])),
            c => id.push(c),
        }
    }
    Err("unterminated quoted id".to_string())
}

fn parse_line(line: &str) -> std::result::Result<(String, f64, i32), String> {
    let (id, rest) = split_id(line)?;
    let mut fields = rest.split_whitespace();
    let order = fields
        .next()
        .ok_or_else(|| format!("missing order for `{id}`"))?;
    let order: f64 = order
        .parse()
        .map_err(|_| format!("invalid order `{order}` for `{id}`"))?;
    let layer = fields
        .next()
        .ok_or_else(|| format!("missing layer for `{id}`"))?;
    let layer: i32 = layer
        .parse()
        .map_err(|_| format!("invalid layer `{layer}` for `{id}`"))?;
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field `{extra}` after `{id}`"));
    }
    Ok((id, order, layer))
}

/// Writes every vertex that carries a layer.
pub fn write_layers<W: Write>(network: &Network, mut writer: W) -> Result<()> {
    for v in network.vertices() {
        let Some(layer) = v.layer() else {
            continue;
        };
        writeln!(writer, "{} {} {}", quote_id(v.id()), v.order(), layer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a cache and applies it. The whole input is parsed before anything is applied, so a
/// malformed line leaves the network untouched.
pub fn read_layers<R: BufRead>(network: &mut Network, reader: R) -> Result<CacheReport> {
    let mut entries: Vec<(VertexIx, f64, i32)> = Vec::new();
    let mut report = CacheReport::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (id, order, layer) = parse_line(trimmed).map_err(|message| Error::MalformedCache {
            line: i + 1,
            message,
        })?;
        match network.vertex_ix(&id) {
            Some(v) => entries.push((v, order, layer)),
            None => {
                tracing::warn!(id = %id, "layer cache names an unknown vertex");
                report.unknown.push(id);
            }
        }
    }

    for (v, order, layer) in entries {
        network.set_layer(v, layer);
        network.set_order(v, order);
        report.applied += 1;
    }
    tracing::debug!(
        applied = report.applied,
        unknown = report.unknown.len(),
        "loaded layer cache"
    );
    Ok(report)
}

/// Writes the cache that belongs next to `document`.
pub fn save_cache(network: &Network, document: &Path) -> Result<PathBuf> {
    let path = cache_path_for(document);
    let file = File::create(&path)?;
    write_layers(network, BufWriter::new(file))?;
    Ok(path)
}

/// Loads the cache that belongs next to `document`; `Ok(None)` when there is none.
pub fn load_cache(network: &mut Network, document: &Path) -> Result<Option<CacheReport>> {
    let path = cache_path_for(document);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    read_layers(network, BufReader::new(file)).map(Some)
}
