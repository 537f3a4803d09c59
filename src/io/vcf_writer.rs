use crate::utils::util::Result;
use rust_htslib::bcf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputType {
    Vcf { is_uncompressed: bool },
    Bcf { is_uncompressed: bool },
}

impl OutputType {
    fn parts(&self) -> (bool, bcf::Format) {
        match *self {
            Self::Vcf { is_uncompressed } => (is_uncompressed, bcf::Format::Vcf),
            Self::Bcf { is_uncompressed } => (is_uncompressed, bcf::Format::Bcf),
        }
    }
}

pub struct VcfWriter {
    pub writer: bcf::Writer,
    written: u64,
}

impl VcfWriter {
    fn resolve_output_type(output_type: &Option<OutputType>, output: Option<&str>) -> OutputType {
        match (output_type, output) {
            (Some(output_type), _) => output_type.clone(),
            (None, Some(path)) => Self::infer_output_type_from_extension(path),
            (None, None) => OutputType::Vcf {
                is_uncompressed: true,
            },
        }
    }

    pub fn new(
        header: &bcf::Header,
        output_type: &Option<OutputType>,
        output: Option<&String>,
    ) -> Result<Self> {
        let output_type = Self::resolve_output_type(output_type, output.map(String::as_str));
        log::trace!("{:?}", &output_type);
        let (is_uncompressed, format) = output_type.parts();

        let writer = match output {
            Some(path) => bcf::Writer::from_path(path, header, is_uncompressed, format),
            None => bcf::Writer::from_stdout(header, is_uncompressed, format),
        }
        .map_err(|e| crate::polyx_error!("Failed to create writer: {}", e))?;

        Ok(VcfWriter { writer, written: 0 })
    }

    /// Rebinds a record read with the input header to the output header.
    pub fn translate(&mut self, record: &mut bcf::Record) {
        self.writer.translate(record);
    }

    pub fn write(&mut self, record: &bcf::Record) -> Result<()> {
        self.writer
            .write(record)
            .map_err(|e| crate::polyx_error!("Failed to write record: {}", e))?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    fn infer_output_type_from_extension(path: &str) -> OutputType {
        let path_lower = path.to_lowercase();
        match path_lower.as_str() {
            s if s.ends_with(".bcf.gz") => OutputType::Bcf {
                is_uncompressed: false,
            },
            s if s.ends_with(".vcf.gz") || s.ends_with(".vcf.bgz") => OutputType::Vcf {
                is_uncompressed: false,
            },
            s if s.ends_with(".bcf") => OutputType::Bcf {
                is_uncompressed: true,
            },
            _ => OutputType::Vcf {
                is_uncompressed: true,
            },
        }
    }
}
