//! Builds ABIF files in memory for tests.
//!
//! Layout: header, root entry, offset-stored value data, then the directory
//! table at the end of the file as instruments write it.

#![allow(dead_code)]

pub const ENTRY_SIZE: usize = 28;
/// Offset of the data field within a directory entry.
pub const DATA_FIELD_OFFSET: usize = 20;

#[derive(Debug, Clone)]
pub struct PendingEntry {
    pub name: [u8; 4],
    pub number: i32,
    pub type_code: i16,
    pub element_size: i16,
    pub num_elements: i32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct BuiltFile {
    pub bytes: Vec<u8>,
    pub directory_offset: usize,
    /// File offset of each entry's value data; `None` when stored inline.
    pub data_offsets: Vec<Option<usize>>,
}

impl BuiltFile {
    /// File offset of the i-th directory entry.
    pub fn entry_offset(&self, i: usize) -> usize {
        self.directory_offset + i * ENTRY_SIZE
    }

    /// File offset of the i-th entry's 4-byte data field.
    pub fn data_field_offset(&self, i: usize) -> usize {
        self.entry_offset(i) + DATA_FIELD_OFFSET
    }
}

#[derive(Debug, Clone)]
pub struct AbifFileBuilder {
    version: i16,
    root_name: [u8; 4],
    entries: Vec<PendingEntry>,
}

impl Default for AbifFileBuilder {
    fn default() -> Self {
        Self {
            version: 101,
            root_name: *b"tdir",
            entries: Vec::new(),
        }
    }
}

impl AbifFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_name(mut self, name: &[u8; 4]) -> Self {
        self.root_name = *name;
        self
    }

    pub fn entry(
        mut self,
        name: &[u8; 4],
        number: i32,
        type_code: i16,
        element_size: i16,
        num_elements: i32,
        data: Vec<u8>,
    ) -> Self {
        self.entries.push(PendingEntry {
            name: *name,
            number,
            type_code,
            element_size,
            num_elements,
            data,
        });
        self
    }

    pub fn pstring(self, name: &[u8; 4], number: i32, text: &str) -> Self {
        let mut data = vec![text.len() as u8];
        data.extend_from_slice(text.as_bytes());
        let count = data.len() as i32;
        self.entry(name, number, 18, 1, count, data)
    }

    pub fn cstring(self, name: &[u8; 4], number: i32, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        let count = data.len() as i32;
        self.entry(name, number, 19, 1, count, data)
    }

    pub fn chars(self, name: &[u8; 4], number: i32, text: &str) -> Self {
        let count = text.len() as i32;
        self.entry(name, number, 2, 1, count, text.as_bytes().to_vec())
    }

    pub fn shorts(self, name: &[u8; 4], number: i32, values: &[i16]) -> Self {
        let data = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.entry(name, number, 4, 2, values.len() as i32, data)
    }

    pub fn longs(self, name: &[u8; 4], number: i32, values: &[i32]) -> Self {
        let data = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.entry(name, number, 5, 4, values.len() as i32, data)
    }

    pub fn build(&self) -> BuiltFile {
        let mut bytes = b"ABIF".to_vec();
        bytes.extend_from_slice(&self.version.to_be_bytes());
        let root_at = bytes.len();
        bytes.extend_from_slice(&[0u8; ENTRY_SIZE]);

        let mut fields = Vec::with_capacity(self.entries.len());
        let mut data_offsets = Vec::with_capacity(self.entries.len());
        for pending in &self.entries {
            if pending.data.len() <= 4 {
                let mut field = [0u8; 4];
                field[..pending.data.len()].copy_from_slice(&pending.data);
                fields.push(field);
                data_offsets.push(None);
            } else {
                let offset = bytes.len();
                bytes.extend_from_slice(&pending.data);
                fields.push((offset as i32).to_be_bytes());
                data_offsets.push(Some(offset));
            }
        }

        let directory_offset = bytes.len();
        for (pending, field) in self.entries.iter().zip(&fields) {
            bytes.extend(record(
                &pending.name,
                pending.number,
                pending.type_code,
                pending.element_size,
                pending.num_elements,
                pending.data.len() as i32,
                *field,
            ));
        }

        let root = record(
            &self.root_name,
            1,
            1023,
            ENTRY_SIZE as i16,
            self.entries.len() as i32,
            (self.entries.len() * ENTRY_SIZE) as i32,
            (directory_offset as i32).to_be_bytes(),
        );
        bytes[root_at..root_at + ENTRY_SIZE].copy_from_slice(&root);

        BuiltFile {
            bytes,
            directory_offset,
            data_offsets,
        }
    }
}

pub fn record(
    name: &[u8; 4],
    number: i32,
    type_code: i16,
    element_size: i16,
    num_elements: i32,
    data_size: i32,
    field: [u8; 4],
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(ENTRY_SIZE);
    bytes.extend_from_slice(name);
    bytes.extend_from_slice(&number.to_be_bytes());
    bytes.extend_from_slice(&type_code.to_be_bytes());
    bytes.extend_from_slice(&element_size.to_be_bytes());
    bytes.extend_from_slice(&num_elements.to_be_bytes());
    bytes.extend_from_slice(&data_size.to_be_bytes());
    bytes.extend_from_slice(&field);
    bytes.extend_from_slice(&0i32.to_be_bytes());
    bytes
}
