use std::io::{self, Write};

use anyhow::Result;
use bijli_cli::cli::ListFormat;
use bijli_cli::config::BijliConfig;
use bijli_core::{AnalysisProfile, Preset};
use tabwriter::TabWriter;

pub fn handle(format: ListFormat, config: &BijliConfig) -> Result<()> {
    let mut entries: Vec<(AnalysisProfile, &str, &str)> = Preset::ALL
        .into_iter()
        .map(|p| (p.profile(), "built-in", p.description()))
        .collect();
    entries.extend(
        config
            .profiles
            .iter()
            .map(|p| (p.clone(), "config", "")),
    );

    match format {
        ListFormat::Table => print_table(&entries),
        ListFormat::Json => {
            let profiles: Vec<&AnalysisProfile> = entries.iter().map(|(p, _, _)| p).collect();
            serde_json::to_writer_pretty(io::stdout(), &profiles)
                .map_err(|err| anyhow::anyhow!("serializing profiles to JSON: {err}"))?;
            println!();
            Ok(())
        }
    }
}

fn print_table(entries: &[(AnalysisProfile, &str, &str)]) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "NAME\tSOURCE\tGROUP KEY\tDESCRIPTION")?;
    for (profile, source, description) in entries {
        let key: Vec<&str> = profile.group_key.iter().map(|c| c.header()).collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            profile.name,
            source,
            key.join(" + "),
            description
        )?;
    }
    writer.flush()?;
    Ok(())
}
