use anyhow::Context;
use maskpath::{
    astar,
    util::{default_endpoints, load_grid},
    Graph, SearchConfig,
};

fn load_config(path: Option<String>) -> Result<SearchConfig, anyhow::Error> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path))
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let image = args.next().unwrap_or_else(|| "data/maze.png".to_string());
    let config = load_config(args.next())?;

    let grid = load_grid(&image).with_context(|| format!("loading mask {}", image))?;
    let graph = Graph::build(&grid);
    log::info!("{}: {:?}", image, graph.stats());

    let (start, goal) = default_endpoints(&grid);
    let outcome = astar(&graph, start, goal, &config)?;
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("costs:\n{}", graph.render_storage(&outcome.costs));
    }

    println!("{}", grid.render_path(&outcome.result.path));
    println!("{}", serde_json::to_string(&outcome.result)?);

    Ok(())
}
