use crate::commands::Commands;
use docstore_config::Config;
use docstore_core::{Document, Error};
use docstore_engine::Database;

/// Parse the optional `create` content argument
pub(crate) fn parse_content(content: Option<&str>) -> Result<Option<Document>, Error> {
    content
        .map(|text| {
            serde_json::from_str::<Document>(text)
                .map_err(|e| Error::validation("content", format!("expected a JSON object: {e}")))
        })
        .transpose()
}

fn print_keys(keys: &[String]) -> eyre::Result<()> {
    println!("{}", serde_json::to_string(keys)?);
    Ok(())
}

impl Commands {
    pub async fn execute(self, mut config: Config) -> eyre::Result<()> {
        if let Commands::Serve { bind } = self {
            if let Some(addr) = bind {
                config.bind_addr = addr;
            }
            docstore_server::run(&config).await?;
            return Ok(());
        }

        let db = Database::open(&config).await?;
        match self {
            Commands::Serve { .. } => {}
            Commands::Get { file, key } => {
                println!("{}", db.get(&file, key.as_deref()).await?);
            }
            Commands::Set { file, key, value } => {
                db.set(&file, &key, &value).await?;
                println!("Value set");
            }
            Commands::Remove { file, key } => {
                db.remove(&file, &key).await?;
                println!("Value removed");
            }
            Commands::Create { file, content } => {
                let content = parse_content(content.as_deref())?;
                db.create_file(&file, content).await?;
                println!("File written");
            }
            Commands::Delete { file } => {
                db.delete_file(&file).await?;
                println!("File deleted");
            }
            Commands::Merge => {
                db.merge_data().await?;
                println!("Files merged");
            }
            Commands::Union { file_a, file_b } => {
                print_keys(&db.union(&file_a, &file_b).await?)?;
            }
            Commands::Intersect { file_a, file_b } => {
                print_keys(&db.intersect(&file_a, &file_b).await?)?;
            }
            Commands::Difference { file_a, file_b } => {
                print_keys(&db.difference(&file_a, &file_b).await?)?;
            }
        }
        Ok(())
    }
}
