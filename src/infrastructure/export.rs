// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::batch::OutputTables;
use crate::domain::models::product::ExtractionResult;
use crate::utils::errors::ExportError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const RESULTS_FILE: &str = "results.csv";
pub const SPECIFICATIONS_FILE: &str = "specifications.csv";
pub const IMAGES_FILE: &str = "images.csv";

/// 各表的列名，与序列化字段名一致；表为空时也写出表头
pub const RESULT_COLUMNS: &[&str] = &[
    "materialId",
    "source",
    "productUrl",
    "productName",
    "price",
    "brand",
    "sku",
    "sellerName",
    "status",
    "errorReason",
    "scrapedAt",
];
pub const SPECIFICATION_COLUMNS: &[&str] = &["materialId", "productName", "specName", "specValue"];
pub const IMAGE_COLUMNS: &[&str] =
    &["materialId", "productName", "imageUrl", "imageType", "imageOrder"];

/// 写出三张表，每张表一个CSV文件
///
/// 目录不存在时自动创建，返回写出的文件路径。
pub fn write_csv_tables(
    dir: impl AsRef<Path>,
    tables: &OutputTables,
) -> Result<Vec<PathBuf>, ExportError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let results = dir.join(RESULTS_FILE);
    let specifications = dir.join(SPECIFICATIONS_FILE);
    let images = dir.join(IMAGES_FILE);

    write_rows(&results, RESULT_COLUMNS, &tables.results)?;
    write_rows(&specifications, SPECIFICATION_COLUMNS, &tables.specifications)?;
    write_rows(&images, IMAGE_COLUMNS, &tables.images)?;

    info!(
        "Wrote {} results, {} specifications, {} images to {}",
        tables.results.len(),
        tables.specifications.len(),
        tables.images.len(),
        dir.display()
    );
    Ok(vec![results, specifications, images])
}

/// 只写出结果表
pub fn write_results_csv(
    path: impl AsRef<Path>,
    results: &[ExtractionResult],
) -> Result<(), ExportError> {
    write_rows(path.as_ref(), RESULT_COLUMNS, results)
}

/// 以格式化JSON写出三张表
pub fn write_json(path: impl AsRef<Path>, tables: &OutputTables) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, tables)?;
    info!("Wrote JSON export to {}", path.display());
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    // serialize 只在写第一条记录时输出表头
    if rows.is_empty() {
        writer.write_record(columns)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
