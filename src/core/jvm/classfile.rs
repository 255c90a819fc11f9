// ─── Class File Reader ───
// Just enough of the JVM class file format to answer the questions the
// launcher asks about a main class: does it have a usable `main`, and which
// static field holds the game's base directory.

use thiserror::Error;

const MAGIC: u32 = 0xCAFE_BABE;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;

const MAIN_DESCRIPTOR: &str = "([Ljava/lang/String;)V";
const FILE_DESCRIPTOR: &str = "Ljava/io/File;";

#[derive(Debug, Error)]
pub enum ClassFileError {
    #[error("class file truncated at offset {0}")]
    Truncated(usize),
    #[error("bad magic {0:#010x}")]
    BadMagic(u32),
    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownConstant { tag: u8, index: u16 },
    #[error("constant pool index {0} is not a UTF-8 entry")]
    NotUtf8(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub access: u16,
    pub name: String,
    pub descriptor: String,
}

#[derive(Debug, Clone)]
pub struct ClassFile {
    pub name: String,
    pub fields: Vec<Member>,
    pub methods: Vec<Member>,
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, ClassFileError> {
        let mut reader = Reader { bytes, pos: 0 };

        let magic = reader.u32()?;
        if magic != MAGIC {
            return Err(ClassFileError::BadMagic(magic));
        }
        reader.skip(4)?; // minor + major version

        let pool = read_constant_pool(&mut reader)?;

        reader.skip(2)?; // access flags
        let this_class = reader.u16()?;
        reader.skip(2)?; // super class
        let interfaces = reader.u16()? as usize;
        reader.skip(interfaces * 2)?;

        let fields = read_members(&mut reader, &pool)?;
        let methods = read_members(&mut reader, &pool)?;

        let name = match pool.get(this_class as usize) {
            Some(Constant::Class(name_index)) => pool.utf8(*name_index)?.replace('/', "."),
            _ => String::new(),
        };

        Ok(Self {
            name,
            fields,
            methods,
        })
    }

    /// `public static void main(String[])`
    pub fn has_main(&self) -> bool {
        self.methods.iter().any(|method| {
            method.name == "main"
                && method.descriptor == MAIN_DESCRIPTOR
                && method.access & (ACC_PUBLIC | ACC_STATIC) == ACC_PUBLIC | ACC_STATIC
        })
    }

    /// The first `private static java.io.File` field, which old clients use
    /// to remember their working directory.
    pub fn base_dir_field(&self) -> Option<&str> {
        let visibility = ACC_PUBLIC | ACC_PRIVATE | ACC_PROTECTED | ACC_STATIC | ACC_FINAL;
        self.fields
            .iter()
            .find(|field| {
                field.descriptor == FILE_DESCRIPTOR
                    && field.access & visibility == ACC_PRIVATE | ACC_STATIC
            })
            .map(|field| field.name.as_str())
    }
}

enum Constant {
    Utf8(String),
    Class(u16),
    Other,
    // second slot of a long/double
    Unusable,
}

struct ConstantPool(Vec<Constant>);

impl ConstantPool {
    fn get(&self, index: usize) -> Option<&Constant> {
        self.0.get(index)
    }

    fn utf8(&self, index: u16) -> Result<String, ClassFileError> {
        match self.0.get(index as usize) {
            Some(Constant::Utf8(text)) => Ok(text.clone()),
            _ => Err(ClassFileError::NotUtf8(index)),
        }
    }
}

fn read_constant_pool(reader: &mut Reader<'_>) -> Result<ConstantPool, ClassFileError> {
    let count = reader.u16()?;
    let mut entries = Vec::with_capacity(count as usize);
    entries.push(Constant::Unusable);

    let mut index = 1;
    while index < count {
        let tag = reader.u8()?;
        let constant = match tag {
            1 => {
                let len = reader.u16()? as usize;
                let raw = reader.take(len)?;
                Constant::Utf8(String::from_utf8_lossy(raw).into_owned())
            }
            7 => Constant::Class(reader.u16()?),
            3 | 4 => {
                reader.skip(4)?;
                Constant::Other
            }
            5 | 6 => {
                reader.skip(8)?;
                entries.push(Constant::Other);
                index += 1;
                Constant::Unusable
            }
            8 | 16 | 19 | 20 => {
                reader.skip(2)?;
                Constant::Other
            }
            9 | 10 | 11 | 12 | 17 | 18 => {
                reader.skip(4)?;
                Constant::Other
            }
            15 => {
                reader.skip(3)?;
                Constant::Other
            }
            _ => return Err(ClassFileError::UnknownConstant { tag, index }),
        };
        entries.push(constant);
        index += 1;
    }

    Ok(ConstantPool(entries))
}

fn read_members(reader: &mut Reader<'_>, pool: &ConstantPool) -> Result<Vec<Member>, ClassFileError> {
    let count = reader.u16()?;
    let mut members = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let access = reader.u16()?;
        let name = pool.utf8(reader.u16()?)?;
        let descriptor = pool.utf8(reader.u16()?)?;

        let attributes = reader.u16()?;
        for _ in 0..attributes {
            reader.skip(2)?;
            let len = reader.u32()? as usize;
            reader.skip(len)?;
        }

        members.push(Member {
            access,
            name,
            descriptor,
        });
    }

    Ok(members)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], ClassFileError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ClassFileError::Truncated(self.pos))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassFileError> {
        self.take(len).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8, ClassFileError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFileError> {
        let raw = self.take(2)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFileError> {
        let raw = self.take(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}
