use clap::{Parser, Subcommand};
use log::info;
use pdfemit::{Dictionary, NodeId, Object, PdfWriter, WriteOptions, dictionary};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, author, about = "PDF utility program using the pdfemit library")]
struct Args {
    /// Output file
    #[arg(short, long, global = true, default_value = "out.pdf")]
    output: PathBuf,

    /// Version written into the file header
    #[arg(long, global = true, default_value = "1.3")]
    pdf_version: String,

    /// Write stream payloads uncompressed
    #[arg(long, global = true)]
    no_compress: bool,

    /// Log every object number as it is assigned
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a document of numbered pages
    Blank {
        /// Number of pages
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Page width in points
        #[arg(long, default_value_t = 612)]
        width: u32,

        /// Page height in points
        #[arg(long, default_value_t = 792)]
        height: u32,
    },
}

fn blank(writer: &mut PdfWriter, pages: u32, width: u32, height: u32) -> pdfemit::Result<()> {
    let doc = writer.document_mut();
    let font = doc.add(
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        }
        .with_indirect(true),
    );
    let fonts = doc.add(dictionary! { "F1" => font });
    let resources = doc.add(dictionary! { "Font" => fonts });
    let media_box = doc.add(
        [0, 0, width, height]
            .into_iter()
            .collect::<pdfemit::Array>()
            .with_indirect(true),
    );

    for number in 1..=pages {
        let content = format!(
            "BT /F1 24 Tf 72 {} Td (Page {} of {}) Tj ET\n",
            height.saturating_sub(72),
            number,
            pages
        );
        let page = new_page(writer, content.into_bytes(), resources, media_box);
        writer.add_page(page)?;
    }
    Ok(())
}

fn new_page(writer: &mut PdfWriter, content: Vec<u8>, resources: NodeId, media_box: NodeId) -> NodeId {
    let doc = writer.document_mut();
    let contents = doc.add(Dictionary::new().with_stream(content));
    doc.add(dictionary! {
        "Type" => "Page",
        "MediaBox" => media_box,
        "Resources" => resources,
        "Contents" => contents,
        "Rotate" => Object::Integer(0),
    })
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = WriteOptions::builder()
        .version(args.pdf_version)
        .compress(!args.no_compress)
        .log_objects(args.verbose)
        .build();
    let mut writer = PdfWriter::with_options(options);

    let result = match args.command {
        Command::Blank { pages, width, height } => blank(&mut writer, pages, width, height),
    }
    .and_then(|()| {
        info!("writing {} pages to {}", writer.page_count(), args.output.display());
        writer.write(&args.output).map(|_| ())
    });

    match result {
        Ok(()) => {
            println!("Saved {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
