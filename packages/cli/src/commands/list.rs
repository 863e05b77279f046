use super::play;
use crate::render;
use anyhow::Result;
use clap::Args;
use locations_editor::{Event, Runtime};
use locations_sync::LocationsApi;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the collection as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn list<A: LocationsApi>(runtime: &mut Runtime<A>, args: ListArgs) -> Result<()> {
    play(runtime, vec![Event::Refresh]).await?;

    let sites = runtime.editor().store().sites();
    if args.json {
        println!("{}", serde_json::to_string_pretty(sites)?);
    } else {
        print!("{}", render::site_list(sites));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{runtime, site};
    use locations_editor::LOAD_FAILED_MESSAGE;
    use locations_sync::{Operation, SyncError};

    #[tokio::test]
    async fn test_list_loads_store() {
        let mut runtime = runtime(vec![site("a", "Depot"), site("b", "Kitchen")]);
        list(&mut runtime, ListArgs { json: true }).await.unwrap();
        assert_eq!(runtime.editor().store().len(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_reports_banner() {
        let mut runtime = runtime(vec![]);
        runtime
            .client()
            .api()
            .fail_next(Operation::List, SyncError::Transport("refused".to_string()));

        let err = list(&mut runtime, ListArgs { json: false }).await.unwrap_err();
        assert_eq!(err.to_string(), LOAD_FAILED_MESSAGE);
    }
}
