/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 分类器检查点的保存与加载
 *
 * 两种格式，按文件扩展名选择：
 * - `.json`：可读的 JSON
 * - 其他：魔数`MLPC` + u32 版本号（小端）+ bincode 编码的记录
 *
 * 保存时先写同目录下的临时文件，完整写入后再改名覆盖目标。
 */

mod error;
mod record;

#[cfg(test)]
mod tests;

pub use error::{CheckpointError, ParamKind, ParamMismatch, ShapeMismatchError};
pub use record::{Checkpoint, LayerParams, ParamRecord};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::classifier::Classifier;

/// 二进制检查点的魔数
const CHECKPOINT_MAGIC: &[u8; 4] = b"MLPC";
/// 二进制检查点的版本
const CHECKPOINT_VERSION: u32 = 1;

/// 检查点的存储格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Binary,
    Json,
}

impl Format {
    /// `.json`（不区分大小写）为 JSON，其余为二进制
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Binary,
        }
    }
}

impl Checkpoint {
    pub fn write_to<W: Write>(&self, mut writer: W, format: Format) -> Result<(), CheckpointError> {
        match format {
            Format::Json => serde_json::to_writer_pretty(&mut writer, self)
                .map_err(|e| CheckpointError::Encode(e.to_string()))?,
            Format::Binary => {
                writer.write_all(CHECKPOINT_MAGIC)?;
                writer.write_all(&CHECKPOINT_VERSION.to_le_bytes())?;
                bincode::serialize_into(&mut writer, self)
                    .map_err(|e| CheckpointError::Encode(e.to_string()))?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R, format: Format) -> Result<Self, CheckpointError> {
        match format {
            Format::Json => {
                serde_json::from_reader(reader).map_err(|e| CheckpointError::Decode(e.to_string()))
            }
            Format::Binary => {
                let mut magic = [0u8; 4];
                reader.read_exact(&mut magic)?;
                if &magic != CHECKPOINT_MAGIC {
                    return Err(CheckpointError::BadMagic { found: magic });
                }
                let mut version = [0u8; 4];
                reader.read_exact(&mut version)?;
                let version = u32::from_le_bytes(version);
                if version != CHECKPOINT_VERSION {
                    return Err(CheckpointError::UnsupportedVersion(version));
                }
                bincode::deserialize_from(reader).map_err(|e| CheckpointError::Decode(e.to_string()))
            }
        }
    }
}

/// 保存分类器的检查点，格式由扩展名决定
pub fn save_checkpoint<P: AsRef<Path>>(
    classifier: &Classifier,
    destination: P,
) -> Result<(), CheckpointError> {
    let destination = destination.as_ref();
    let checkpoint = Checkpoint::from_classifier(classifier)?;
    let format = Format::from_path(destination);
    let temp = temp_sibling(destination);

    if let Err(e) = write_file(&checkpoint, &temp, format) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp, destination) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }

    debug!(
        "检查点已保存到 {}（{:?}，{} 层）",
        destination.display(),
        format,
        checkpoint.parameters.len()
    );
    Ok(())
}

/// 读取检查点并重建分类器（dropout 概率取默认值）
pub fn load_checkpoint<P: AsRef<Path>>(source: P) -> Result<Classifier, CheckpointError> {
    let source = source.as_ref();
    let format = Format::from_path(source);
    let reader = BufReader::new(File::open(source)?);
    let checkpoint = Checkpoint::read_from(reader, format)?;
    debug!(
        "从 {} 读取检查点：{} -> {:?} -> {}",
        source.display(),
        checkpoint.input_size,
        checkpoint.hidden_sizes,
        checkpoint.output_size
    );
    checkpoint.into_classifier()
}

fn write_file(checkpoint: &Checkpoint, path: &Path, format: Format) -> Result<(), CheckpointError> {
    let mut writer = BufWriter::new(File::create(path)?);
    checkpoint.write_to(&mut writer, format)?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    Ok(())
}

/// 同目录下的临时文件：`.<文件名>.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}
