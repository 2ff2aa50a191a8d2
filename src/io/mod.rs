//! Objects used to read trace corpora and to write learned models.

mod model_writer;
pub use model_writer::ModelWriter;

mod trace_reader;
pub use trace_reader::TraceReader;
