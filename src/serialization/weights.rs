use std::fs;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::ntuple::{Network, ShapeError, TupleScheme, WeightTable, TABLE_SIZE};

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("weight stream too short or malformed")]
    Malformed,
    #[error("weights do not fit the tuple scheme: {0}")]
    Shape(#[from] ShapeError),
}

// Sanity caps on declared sizes, so a corrupt header cannot force a huge allocation.
const MAX_TABLES: u64 = 1024;
const MAX_ENTRIES: u64 = 1 << 32;

#[inline]
fn read_u64_le<R: Read>(r: &mut R) -> Result<u64, PersistError> {
    let mut buf = [0u8; 8];
    read_full(r, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[inline]
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), PersistError> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PersistError::Malformed,
        _ => PersistError::Io(e),
    })
}

/// Write tables as `u64 count`, then per table `u64 len` followed by `len`
/// little-endian `f32` values.
pub fn write_tables<W: Write>(w: &mut W, tables: &[WeightTable]) -> Result<(), PersistError> {
    w.write_all(&(tables.len() as u64).to_le_bytes())?;
    for table in tables {
        w.write_all(&(table.len() as u64).to_le_bytes())?;
        for &v in table.as_slice() {
            w.write_all(&v.to_bits().to_le_bytes())?;
        }
    }
    Ok(())
}

/// Inverse of [`write_tables`]. Values round-trip bit for bit.
pub fn read_tables<R: Read>(r: &mut R) -> Result<Vec<WeightTable>, PersistError> {
    let count = read_u64_le(r)?;
    if count > MAX_TABLES {
        return Err(PersistError::Malformed);
    }
    let mut tables = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_u64_le(r)?;
        if len > MAX_ENTRIES {
            return Err(PersistError::Malformed);
        }
        let mut weights = Vec::with_capacity((len as usize).min(TABLE_SIZE));
        let mut buf = [0u8; 4];
        for _ in 0..len {
            read_full(r, &mut buf)?;
            weights.push(f32::from_bits(u32::from_le_bytes(buf)));
        }
        tables.push(WeightTable::from_vec(weights));
    }
    Ok(tables)
}

/// Encode the network's tables to bytes.
pub fn encode_weights(net: &Network) -> Vec<u8> {
    let tables = net.tables();
    let mut buf = Vec::with_capacity(8 + tables.iter().map(|t| 8 + 4 * t.len()).sum::<usize>());
    // Writing into a Vec cannot fail.
    let _ = write_tables(&mut buf, tables);
    buf
}

/// Decode tables from bytes and attach them to `scheme`.
pub fn parse_weights_bytes(bytes: &[u8], scheme: TupleScheme) -> Result<Network, PersistError> {
    let mut cursor = bytes;
    let tables = read_tables(&mut cursor)?;
    Ok(Network::with_tables(scheme, tables)?)
}

/// Write the network's tables to `path`, replacing any existing file.
pub fn write_weights_to_path<P: AsRef<Path>>(path: P, net: &Network) -> Result<(), PersistError> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    write_tables(&mut out, net.tables())?;
    out.flush()?;
    Ok(())
}

/// Load tables from `path` for `scheme`.
pub fn read_weights_from_path<P: AsRef<Path>>(path: P, scheme: TupleScheme) -> Result<Network, PersistError> {
    let mut input = BufReader::new(fs::File::open(path)?);
    let tables = read_tables(&mut input)?;
    Ok(Network::with_tables(scheme, tables)?)
}
