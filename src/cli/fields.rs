use crate::errors::Result;
use crate::output::OutputFormat;
use crate::schema::Schema;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Path to the schema SDL file
    pub schema: PathBuf,

    /// List leaf fields only
    #[arg(long)]
    pub only_leafs: bool,

    /// Lowercase every field path
    #[arg(long)]
    pub normalize: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: &FieldsArgs) -> Result<()> {
    let schema = Schema::load(&args.schema)?;
    let mut fields = schema.fields(args.only_leafs)?;
    if args.normalize {
        fields = crate::path::lowercase(&fields);
    }

    let mut stdout = std::io::stdout();
    match args.format {
        OutputFormat::Json => crate::output::json::write_fields_json(&mut stdout, &fields)?,
        OutputFormat::Text | OutputFormat::Csv => {
            crate::output::text::write_fields_text(&mut stdout, &fields)?
        }
    }
    Ok(())
}
