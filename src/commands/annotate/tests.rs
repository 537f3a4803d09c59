use super::annotate;
use crate::{
    cli::{Cli, PolyxArgs},
    core::test_utils::write_indexed_fasta,
    error::PolyxError,
    utils::util::init_logger,
};
use clap::Parser;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

const HEADER: &str = "##fileformat=VCFv4.2
##contig=<ID=chr1,length=8>
##contig=<ID=chr2,length=10>
##contig=<ID=chr3,length=5>
##FILTER=<ID=LowQual,Description=\"Low quality\">
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Depth\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
";

const CONTIGS: &[(&str, &str)] = &[("chr1", "AAAAACGT"), ("chr2", "GGGTTacccc")];

struct Fixture {
    dir: TempDir,
    reference: PathBuf,
    input: PathBuf,
    output: PathBuf,
}

fn fixture(body: &str) -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let reference = write_indexed_fasta(&dir, CONTIGS);
    let input = dir.path().join("input.vcf");
    fs::write(&input, format!("{HEADER}{body}")).expect("test VCF should be writable");
    let output = dir.path().join("output.vcf");
    Fixture {
        dir,
        reference,
        input,
        output,
    }
}

fn parse_args(fixture: &Fixture, extra: &[&str]) -> PolyxArgs {
    let mut args = vec![
        "vcfpolyx".to_string(),
        "-R".to_string(),
        fixture.reference.display().to_string(),
        "-o".to_string(),
        fixture.output.display().to_string(),
        "--no-version".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    args.push(fixture.input.display().to_string());
    Cli::try_parse_from(args)
        .expect("CLI parse should succeed")
        .args
}

/// (CHROM, POS, FILTER, INFO) of every output record.
fn output_records(fixture: &Fixture) -> Vec<(String, u64, String, String)> {
    fs::read_to_string(&fixture.output)
        .expect("output VCF should exist")
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            (
                fields[0].to_string(),
                fields[1].parse().expect("POS should be numeric"),
                fields[6].to_string(),
                fields[7].to_string(),
            )
        })
        .collect()
}

fn output_header(fixture: &Fixture) -> String {
    fs::read_to_string(&fixture.output)
        .expect("output VCF should exist")
        .lines()
        .filter(|line| line.starts_with("##"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn annotates_run_length_without_filter() {
    init_logger();
    let fixture = fixture(
        "chr1\t5\t.\tA\tG\t50\t.\t.
chr1\t6\t.\tC\tT\t50\t.\tDP=7
chr1\t1\t.\tA\tT\t50\t.\t.
",
    );
    annotate(parse_args(&fixture, &[])).unwrap();

    assert_eq!(
        output_records(&fixture),
        vec![
            ("chr1".to_string(), 5, ".".to_string(), "POLYX=5".to_string()),
            ("chr1".to_string(), 6, ".".to_string(), "DP=7;POLYX=1".to_string()),
            ("chr1".to_string(), 1, ".".to_string(), "POLYX=5".to_string()),
        ]
    );
    let header = output_header(&fixture);
    assert!(header.contains("##INFO=<ID=POLYX,Number=1,Type=Integer,"));
    assert!(!header.contains("##FILTER=<ID=POLYX_ge_"));
    assert!(!header.contains("##vcfpolyxVersion"));
}

#[test]
fn threshold_adds_filter() {
    init_logger();
    let fixture = fixture(
        "chr1\t5\t.\tA\tG\t50\tPASS\t.
chr1\t6\t.\tC\tT\t50\tPASS\t.
",
    );
    annotate(parse_args(&fixture, &["-n", "5"])).unwrap();

    let records = output_records(&fixture);
    assert_eq!(records[0].2, "POLYX_ge_5");
    assert_eq!(records[0].3, "POLYX=5");
    assert_eq!(records[1].2, "PASS");
    assert_eq!(records[1].3, "POLYX=1");
    assert!(output_header(&fixture).contains(
        r#"##FILTER=<ID=POLYX_ge_5,Description="Number of repeated bases around REF is greater or equal to 5">"#
    ));
}

#[test]
fn custom_tag_and_soft_masked_reference() {
    init_logger();
    // chr2 = GGGTTacccc, the deletion spans TTa
    let fixture = fixture(
        "chr2\t5\t.\tTa\tT\t50\t.\t.
chr2\t8\t.\tC\tA\t50\t.\t.
",
    );
    annotate(parse_args(&fixture, &["-t", "HRUN", "-n", "4"])).unwrap();

    let records = output_records(&fixture);
    // left: T at index 4 plus T at 3; right: a at index 5 followed by cccc
    assert_eq!(records[0].3, "HRUN=2");
    assert_eq!(records[0].2, ".");
    assert_eq!(records[1].3, "HRUN=4");
    assert_eq!(records[1].2, "HRUN_ge_4");
}

#[test]
fn skip_filtered_forwards_filtered_records_unchanged() {
    init_logger();
    let fixture = fixture(
        "chr1\t5\t.\tA\tG\t50\tLowQual\tDP=3
chr1\t4\t.\tA\tG\t50\t.\tDP=3
",
    );
    annotate(parse_args(&fixture, &["--skip-filtered", "-n", "2"])).unwrap();

    let records = output_records(&fixture);
    assert_eq!(records[0].2, "LowQual");
    assert_eq!(records[0].3, "DP=3");
    assert_eq!(records[1].2, "POLYX_ge_2");
    assert_eq!(records[1].3, "DP=3;POLYX=5");
}

#[test]
fn filtered_records_are_annotated_by_default() {
    init_logger();
    let fixture = fixture("chr1\t5\t.\tA\tG\t50\tLowQual\t.\n");
    annotate(parse_args(&fixture, &["-n", "2"])).unwrap();

    let records = output_records(&fixture);
    assert_eq!(records[0].2, "LowQual;POLYX_ge_2");
    assert_eq!(records[0].3, "POLYX=5");
}

#[test]
fn interleaved_contigs_keep_input_order() {
    init_logger();
    let fixture = fixture(
        "chr1\t5\t.\tA\tG\t50\t.\t.
chr2\t2\t.\tG\tA\t50\t.\t.
chr1\t8\t.\tT\tA\t50\t.\t.
",
    );
    annotate(parse_args(&fixture, &[])).unwrap();

    let records: Vec<(String, u64, String)> = output_records(&fixture)
        .into_iter()
        .map(|(contig, pos, _, info)| (contig, pos, info))
        .collect();
    assert_eq!(
        records,
        vec![
            ("chr1".to_string(), 5, "POLYX=5".to_string()),
            ("chr2".to_string(), 2, "POLYX=3".to_string()),
            ("chr1".to_string(), 8, "POLYX=1".to_string()),
        ]
    );
}

#[test]
fn existing_info_value_is_overwritten() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let reference = write_indexed_fasta(&dir, CONTIGS);
    let input = dir.path().join("input.vcf");
    let output = dir.path().join("output.vcf");
    fs::write(
        &input,
        "##fileformat=VCFv4.2
##contig=<ID=chr1,length=8>
##INFO=<ID=POLYX,Number=1,Type=Integer,Description=\"Number of repeated bases around REF\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t5\t.\tA\tG\t50\t.\tPOLYX=42
",
    )
    .unwrap();
    let fixture = Fixture {
        dir,
        reference,
        input,
        output,
    };
    annotate(parse_args(&fixture, &[])).unwrap();

    let records = output_records(&fixture);
    assert_eq!(records[0].3, "POLYX=5");
    assert_eq!(output_header(&fixture).matches("##INFO=<ID=POLYX,").count(), 1);
}

#[test]
fn incompatible_info_definition_is_replaced() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let reference = write_indexed_fasta(&dir, CONTIGS);
    let input = dir.path().join("input.vcf");
    let output = dir.path().join("output.vcf");
    fs::write(
        &input,
        "##fileformat=VCFv4.2
##contig=<ID=chr1,length=8>
##INFO=<ID=POLYX,Number=1,Type=String,Description=\"Free text\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t5\t.\tA\tG\t50\t.\tPOLYX=foo
chr1\t7\t.\tG\tT\t50\t.\t.
",
    )
    .unwrap();
    let fixture = Fixture {
        dir,
        reference,
        input,
        output,
    };
    annotate(parse_args(&fixture, &[])).unwrap();

    let records = output_records(&fixture);
    assert_eq!(records[0].3, "POLYX=5");
    assert_eq!(records[1].3, "POLYX=1");
    let header = output_header(&fixture);
    assert_eq!(header.matches("##INFO=<ID=POLYX,").count(), 1);
    assert!(header.contains("##INFO=<ID=POLYX,Number=1,Type=Integer,"));
}

#[test]
fn version_lines_are_written_unless_disabled() {
    init_logger();
    let fixture = fixture("chr1\t5\t.\tA\tG\t50\t.\t.\n");
    let args = Cli::try_parse_from([
        "vcfpolyx".to_string(),
        "-R".to_string(),
        fixture.reference.display().to_string(),
        "-o".to_string(),
        fixture.output.display().to_string(),
        fixture.input.display().to_string(),
    ])
    .unwrap()
    .args;
    annotate(args).unwrap();
    assert!(output_header(&fixture).contains("##vcfpolyxVersion="));
}

#[test]
fn unknown_contig_is_a_configuration_error() {
    init_logger();
    let fixture = fixture(
        "chr1\t5\t.\tA\tG\t50\t.\t.
chr3\t1\t.\tA\tG\t50\t.\t.
",
    );
    let err = annotate(parse_args(&fixture, &[])).unwrap_err();
    assert!(matches!(err, PolyxError::ContigNotFound { ref contig, .. } if contig == "chr3"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn missing_reference_index_is_a_configuration_error() {
    init_logger();
    let fixture = fixture("chr1\t5\t.\tA\tG\t50\t.\t.\n");
    fs::remove_file(fixture.dir.path().join("reference.fa.fai")).unwrap();
    let err = annotate(parse_args(&fixture, &[])).unwrap_err();
    assert!(matches!(err, PolyxError::MissingReferenceIndex { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!fixture.output.exists());
}

#[test]
fn variant_past_contig_end_aborts() {
    init_logger();
    let fixture = fixture("chr1\t9\t.\tA\tG\t50\t.\t.\n");
    let err = annotate(parse_args(&fixture, &[])).unwrap_err();
    assert!(matches!(err, PolyxError::PositionOutOfRange { index: 8, .. }));
    assert_eq!(err.exit_code(), 1);
}
