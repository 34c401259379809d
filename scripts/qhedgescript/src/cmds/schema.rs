use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use schemars::{
    gen::{SchemaGenerator, SchemaSettings},
    schema::RootSchema,
    JsonSchema,
};

use crate::util::{
    config::HedgeConfig,
    report::{PickReport, SearchReport},
    snapshot::Snapshot,
};

use super::Cmd;

// -----------------------------------------------------------------------------
// Args
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Output directory of schemas, printed to stdout when omitted
    #[clap(short = 'o', long = "outdir")]
    pub outdir: Option<PathBuf>,
}

impl Cmd for Args {
    fn run(&self) -> anyhow::Result<()> {
        let schemas = schemas();
        let Some(outdir) = &self.outdir else {
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            return Ok(());
        };
        std::fs::create_dir_all(outdir)
            .with_context(|| format!("Failed to create {:?}", outdir))?;
        for (name, schema) in &schemas {
            let path = outdir.join(format!("{name}.json"));
            log::info!("Writing schema of {name} to {:?}", path);
            std::fs::write(&path, serde_json::to_string_pretty(schema)?)
                .with_context(|| format!("Failed to write {:?}", path))?;
        }
        Ok(())
    }
}

fn schema_for<T: JsonSchema>() -> RootSchema {
    let gen: SchemaGenerator = SchemaSettings::draft07()
        .with(|s| {
            s.option_add_null_type = false;
        })
        .into();
    gen.into_root_schema_for::<T>()
}

fn schemas() -> BTreeMap<&'static str, RootSchema> {
    BTreeMap::from([
        ("snapshot", schema_for::<Snapshot>()),
        ("hedge_config", schema_for::<HedgeConfig>()),
        ("pick_report", schema_for::<PickReport>()),
        ("search_report", schema_for::<SearchReport>()),
    ])
}
