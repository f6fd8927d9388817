pub mod assembler;
pub mod writer;

pub use assembler::SheetAssembler;
pub use writer::DirSheetWriter;
