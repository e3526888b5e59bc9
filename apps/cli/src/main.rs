use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fccw_config::{locate_configs, Category, ProjectConfig};
use fccw_project::{create_file, delete_entry, Selected, TreeIndex, TreeNode, TreeNodeKind};

#[derive(Parser)]
#[command(
    name = "fccw-cli",
    about = "Project explorer commands for .fccw workspaces",
    author,
    version
)]
struct Cli {
    /// 指定工作區根目錄；預設為目前目錄。 / Workspace root (defaults to current directory).
    #[arg(long, global = true, value_name = "PATH")]
    workspace: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 列出工作區內所有 .fccw 設定檔。 / List every .fccw configuration in the workspace.
    Configs,
    /// 顯示合併後的邏輯專案樹。 / Render the merged logical project tree.
    Tree(TreeArgs),
    /// 在指定分類下建立空白檔案。 / Create an empty file under a semantic category.
    New(NewArgs),
    /// 刪除檔案或整個資料夾。 / Delete a file or a whole directory.
    Delete(DeleteArgs),
    /// 建立慣例佈局的起始設定檔。 / Scaffold a conventional project configuration.
    Init(InitArgs),
}

#[derive(Args)]
struct TreeArgs {
    /// 有多個設定檔時僅展開指定的檔案。 / Expand only the given configuration when several exist.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct NewArgs {
    /// 新檔案所屬的語意分類。 / Semantic category the new file belongs to.
    #[arg(value_enum)]
    category: CategoryChoice,

    /// 新檔案名稱。 / Name of the new file.
    name: String,

    /// 作為選取節點的既有路徑。 / Existing path standing in for the selected tree node.
    #[arg(long, value_name = "PATH")]
    at: Option<PathBuf>,

    /// 有多個設定檔時指定解析採用的檔案。 / Configuration to resolve against when several exist.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct DeleteArgs {
    /// 要刪除的檔案或資料夾。 / File or directory to delete.
    path: PathBuf,

    /// 確認刪除；未指定時不做任何事。 / Confirm the deletion; without it nothing happens.
    #[arg(long)]
    yes: bool,
}

#[derive(Args)]
struct InitArgs {
    /// 覆寫既有設定檔。 / Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryChoice {
    Source,
    Resource,
    Include,
}

impl From<CategoryChoice> for Category {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::Source => Category::Source,
            CategoryChoice::Resource => Category::Resource,
            CategoryChoice::Include => Category::Include,
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { workspace, command } = Cli::parse();
    let workspace_root = resolve_workspace(workspace)?;
    match command {
        Commands::Configs => execute_configs(&workspace_root),
        Commands::Tree(args) => execute_tree(args, &workspace_root),
        Commands::New(args) => execute_new(args, &workspace_root),
        Commands::Delete(args) => execute_delete(args),
        Commands::Init(args) => execute_init(args, &workspace_root),
    }
}

fn execute_configs(workspace_root: &Path) -> Result<()> {
    let configs = locate_configs(workspace_root)
        .with_context(|| format!("failed to scan {}", workspace_root.display()))?;
    if configs.is_empty() {
        println!("No configuration files found.");
        return Ok(());
    }
    for config in configs {
        println!("{}", config.display());
    }
    Ok(())
}

fn execute_tree(args: TreeArgs, workspace_root: &Path) -> Result<()> {
    let index = TreeIndex::new(workspace_root);
    let top = index.children(None)?;

    if let Some(wanted) = args.config {
        let wanted = absolutize(&wanted)?;
        if let Some(node) = top
            .iter()
            .find(|node| config_path_of(node) == Some(wanted.as_path()))
        {
            println!("{}", node.label);
            for child in index.children(Some(node))? {
                print_node(&index, &child, 1)?;
            }
            return Ok(());
        }
        if top.iter().any(|node| config_path_of(node).is_some()) {
            bail!("no configuration node for {}", wanted.display());
        }
        // single-config workspace: its sections already sit at the top level
    }

    for node in &top {
        print_node(&index, node, 0)?;
    }
    Ok(())
}

fn config_path_of(node: &TreeNode) -> Option<&Path> {
    match &node.kind {
        TreeNodeKind::Config { config_path } => Some(config_path),
        _ => None,
    }
}

fn print_node(index: &TreeIndex, node: &TreeNode, depth: usize) -> Result<()> {
    let item = index.tree_item(node);
    println!("{}{}", "  ".repeat(depth), item.label);
    for child in index.children(Some(node))? {
        print_node(index, &child, depth + 1)?;
    }
    Ok(())
}

fn execute_new(args: NewArgs, workspace_root: &Path) -> Result<()> {
    let config_path = select_config(args.config, workspace_root)?;
    let index = TreeIndex::new(workspace_root);
    let roots = index.category_roots(&config_path)?;

    let selected = match args.at {
        Some(path) => {
            let path = absolutize(&path)?;
            if !path.exists() {
                bail!("selected path '{}' does not exist", path.display());
            }
            let is_dir = path.is_dir();
            Some(Selected { path, is_dir })
        }
        None => None,
    };

    let created = create_file(
        &roots,
        selected.as_ref(),
        args.category.into(),
        &args.name,
    )?;
    println!("Created {}", created.display());
    Ok(())
}

fn execute_delete(args: DeleteArgs) -> Result<()> {
    let path = absolutize(&args.path)?;
    if !args.yes {
        println!("Skipped deleting {}; pass --yes to confirm.", path.display());
        return Ok(());
    }
    delete_entry(&path)?;
    println!("Deleted {}", path.display());
    Ok(())
}

fn execute_init(args: InitArgs, workspace_root: &Path) -> Result<()> {
    let path = workspace_root.join("project.fccw");
    if path.exists() && !args.force {
        bail!(
            "'{}' already exists; pass --force to overwrite",
            path.display()
        );
    }
    ProjectConfig::conventional().save(&path)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Picks the configuration a command should resolve against: the only one
/// when a single file exists, the explicitly named one otherwise.
/// 決定指令採用的設定檔：僅有一個時直接採用，否則需明確指定。
fn select_config(requested: Option<PathBuf>, workspace_root: &Path) -> Result<PathBuf> {
    let configs = locate_configs(workspace_root)
        .with_context(|| format!("failed to scan {}", workspace_root.display()))?;
    match (requested, configs.as_slice()) {
        (_, []) => bail!(
            "no .fccw configuration found under {}",
            workspace_root.display()
        ),
        (None, [single]) => Ok(single.clone()),
        (None, many) => bail!(
            "{} configuration files exist; pick one with --config",
            many.len()
        ),
        (Some(requested), many) => {
            let requested = absolutize(&requested)?;
            if many.contains(&requested) {
                Ok(requested)
            } else {
                bail!(
                    "'{}' is not a configuration file of this workspace",
                    requested.display()
                )
            }
        }
    }
}

fn resolve_workspace(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => absolutize(&path),
        None => std::env::current_dir().context("determine current directory"),
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("determine current directory")?
            .join(path))
    }
}
