//! 原生户型文件格式（.fplan）
//!
//! 16 字节文件头 + Zstd 压缩的 MessagePack 文档。
//! 加载时与 JSON 导入一样重新计算派生字段并校验布局。

use crate::document::PlanDocument;
use crate::error::{FileError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// 文件魔数 "FPLN"
const MAGIC: &[u8; 4] = b"FPLN";

/// 当前文件格式版本
const FORMAT_VERSION: u32 = 1;

/// Zstd 压缩级别
const COMPRESSION_LEVEL: i32 = 3;

/// 文件头（16 字节）
#[derive(Debug)]
struct FileHeader {
    magic: [u8; 4],
    version: u32,
    /// 标志位（预留）
    flags: u32,
    compressed_size: u32,
}

impl FileHeader {
    fn new(compressed_size: u32) -> Self {
        Self {
            magic: *MAGIC,
            version: FORMAT_VERSION,
            flags: 0,
            compressed_size,
        }
    }

    fn write(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        Ok(())
    }

    fn read(reader: &mut impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(FileError::InvalidFormat(
                "Invalid magic number, not a floor plan file".to_string(),
            ));
        }

        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        let version = u32::from_le_bytes(buf);
        reader.read_exact(&mut buf)?;
        let flags = u32::from_le_bytes(buf);
        reader.read_exact(&mut buf)?;
        let compressed_size = u32::from_le_bytes(buf);

        Ok(Self {
            magic,
            version,
            flags,
            compressed_size,
        })
    }
}

/// 编码为内存中的完整文件
pub fn to_bytes(document: &PlanDocument) -> Result<Vec<u8>> {
    let msgpack_data = rmp_serde::to_vec_named(document)?;
    let compressed_data = zstd::encode_all(msgpack_data.as_slice(), COMPRESSION_LEVEL)?;
    let size = u32::try_from(compressed_data.len())
        .map_err(|_| FileError::InvalidFormat(format!("document too large: {} bytes", compressed_data.len())))?;

    let mut bytes = Vec::with_capacity(16 + compressed_data.len());
    FileHeader::new(size).write(&mut bytes)?;
    bytes.extend_from_slice(&compressed_data);
    Ok(bytes)
}

/// 从字节流解码并校验
pub fn from_reader(reader: &mut impl Read) -> Result<PlanDocument> {
    let header = FileHeader::read(reader)?;
    if header.version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(format!(
            "File version {} is newer than supported version {}",
            header.version, FORMAT_VERSION
        )));
    }

    // 头部大小只作为读取上限
    let mut compressed_data = Vec::new();
    reader
        .by_ref()
        .take(u64::from(header.compressed_size))
        .read_to_end(&mut compressed_data)?;
    if compressed_data.len() != header.compressed_size as usize {
        return Err(FileError::InvalidFormat(format!(
            "Truncated file: expected {} compressed bytes, found {}",
            header.compressed_size,
            compressed_data.len()
        )));
    }
    let msgpack_data = zstd::decode_all(compressed_data.as_slice())?;

    let mut document: PlanDocument = rmp_serde::from_slice(&msgpack_data)?;
    document.layout = document.layout.normalized();
    document.layout.validate()?;
    Ok(document)
}

/// 保存文档到文件
pub fn save(document: &PlanDocument, path: &Path) -> Result<()> {
    let bytes = to_bytes(document)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} rooms to {} ({} bytes)",
        document.layout.rooms.len(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// 从文件加载文档
pub fn load(path: &Path) -> Result<PlanDocument> {
    let mut reader = BufReader::new(File::open(path)?);
    let document = from_reader(&mut reader)?;

    tracing::info!(
        "Loaded {} rooms from {}",
        document.layout.rooms.len(),
        path.display()
    );
    Ok(document)
}
