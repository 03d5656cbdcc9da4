// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::ExtractionRequest;
use crate::utils::errors::InputError;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// 物料编号列
pub const COLUMN_IDENTIFIER: &str = "materialId";
/// 来源站点列
pub const COLUMN_SOURCE: &str = "Source";
/// 商品URL列
pub const COLUMN_URL: &str = "Product URL";

/// 从CSV文件读取提取请求
pub fn read_requests(path: impl AsRef<Path>) -> Result<Vec<ExtractionRequest>, InputError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let requests = read_requests_from(file)?;
    info!("Loaded {} rows from {}", requests.len(), path.display());
    Ok(requests)
}

/// 从任意数据源读取提取请求
///
/// 列名区分大小写，额外的列会被忽略。`NullValue` 中的行号按表格计算，
/// 表头为第 1 行。
pub fn read_requests_from<R: Read>(reader: R) -> Result<Vec<ExtractionRequest>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))
    };
    let columns = [
        (COLUMN_IDENTIFIER, column(COLUMN_IDENTIFIER)?),
        (COLUMN_SOURCE, column(COLUMN_SOURCE)?),
        (COLUMN_URL, column(COLUMN_URL)?),
    ];

    let mut requests = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let row = idx + 2;

        let mut values = [String::new(), String::new(), String::new()];
        for (slot, (name, position)) in values.iter_mut().zip(columns.iter()) {
            let value = record.get(*position).map(str::trim).unwrap_or_default();
            if value.is_empty() {
                return Err(InputError::NullValue {
                    row,
                    column: name.to_string(),
                });
            }
            *slot = value.to_string();
        }

        let [identifier, source_site, url] = values;
        requests.push(ExtractionRequest {
            identifier,
            source_site,
            url,
        });
    }

    Ok(requests)
}
