use crate::domain::model::PhoneBookEntry;
use crate::utils::error::{Result, WhitelistError};
use csv::{StringRecord, StringRecordsIntoIter, Trim};
use std::fs::File;
use std::path::{Path, PathBuf};

const NAME_FIELD: usize = 1;
const NUMBER_FIELD: usize = 2;

impl PhoneBookEntry {
    /// 依欄位位置取出名稱與號碼；引號由 CSV 解析器去除
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        match (record.get(NAME_FIELD), record.get(NUMBER_FIELD)) {
            (Some(name), Some(number)) => Ok(Self {
                name: name.to_string(),
                number: number.to_string(),
            }),
            _ => Err(WhitelistError::MalformedRow {
                fields: record.len(),
            }),
        }
    }
}

/// A phone book export opened for a single forward pass.
pub struct PhoneBook {
    path: PathBuf,
    reader: csv::Reader<File>,
}

impl PhoneBook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| WhitelistError::PhoneBookOpen {
            path: path.clone(),
            source,
        })?;

        let is_file = file
            .metadata()
            .map_err(|source| WhitelistError::PhoneBookOpen {
                path: path.clone(),
                source,
            })?
            .is_file();
        if !is_file {
            return Err(WhitelistError::PhoneBookOpen {
                path,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "not a regular file",
                ),
            });
        }

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .double_quote(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        tracing::debug!("Opened phone book {}", path.display());
        Ok(Self { path, reader })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the phone book; each item is one CSV row.
    pub fn entries(self) -> PhoneBookEntries {
        PhoneBookEntries {
            records: self.reader.into_records(),
        }
    }
}

pub struct PhoneBookEntries {
    records: StringRecordsIntoIter<File>,
}

impl Iterator for PhoneBookEntries {
    type Item = Result<PhoneBookEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map_err(WhitelistError::from)
                .and_then(|record| PhoneBookEntry::from_record(&record)),
        )
    }
}
