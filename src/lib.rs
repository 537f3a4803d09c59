pub mod cli;
pub mod error;

pub mod commands {
    pub mod annotate;
}

pub mod core {
    pub mod annotator;
    pub mod header;
    pub mod reference;
    pub mod scanner;
    pub mod variant;

    #[cfg(test)]
    pub mod test_utils;
}

pub mod io {
    pub mod readers;
    pub mod vcf_reader;
    pub mod vcf_writer;
}

pub mod utils {
    pub mod util;
    pub mod util_intern;
}

pub mod constants;
