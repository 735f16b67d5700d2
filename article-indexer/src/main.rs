use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use article_filter::builder::CatalogBuilder;
use article_filter::render::render_article_grid;
use article_filter::{
    ArticleCatalog, ArticleSource, CompressedCatalog, DemoArticles, FilterState, JsonArticles,
    ThemeFilter, YearFilter,
};

mod error;
mod scan;
mod site;

use error::{IndexerError, Result};

/// 页面目录下的目录文件名
const CATALOG_ASSET: &str = "catalog.bin";

fn catalog_arg() -> Arg {
    Arg::new("catalog")
        .short('c')
        .long("catalog")
        .value_name("CATALOG_FILE")
        .help("目录文件路径，缺省时使用内置示例文章")
        .value_parser(clap::value_parser!(PathBuf))
}

fn cli() -> Command {
    Command::new("catalog-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .author("IAJR")
        .about("生成、查询和发布 IAJR 文章目录")
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .global(true)
            .action(ArgAction::SetTrue))
        .subcommand_required(true)
        .subcommand(Command::new("scan")
            .about("扫描文章 HTML 页面并生成目录")
            .arg(Arg::new("source")
                .short('s')
                .long("source")
                .value_name("SOURCE_DIR")
                .help("文章源目录路径")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .value_name("CATALOG_FILE")
                .help("目录输出路径")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))))
        .subcommand(Command::new("build")
            .about("从 JSON 文章列表生成目录")
            .arg(Arg::new("input")
                .short('i')
                .long("input")
                .value_name("JSON_FILE")
                .help("JSON 文章列表")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .value_name("CATALOG_FILE")
                .help("目录输出路径")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))))
        .subcommand(Command::new("query")
            .about("按搜索词、年份和主题筛选文章")
            .arg(catalog_arg())
            .arg(Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("搜索词，匹配标题、摘要和作者"))
            .arg(Arg::new("year")
                .short('y')
                .long("year")
                .value_name("YEAR")
                .default_value("all")
                .help("年份或 all"))
            .arg(Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("THEME")
                .default_value("all")
                .help("主题名称或 all"))
            .arg(Arg::new("html")
                .long("html")
                .help("输出文章卡片 HTML 而不是 JSON")
                .action(ArgAction::SetTrue)))
        .subcommand(Command::new("years")
            .about("列出目录中的年份（从新到旧）")
            .arg(catalog_arg()))
        .subcommand(Command::new("page")
            .about("生成期刊主页 index.html 和 catalog.bin")
            .arg(catalog_arg())
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .value_name("OUTPUT_DIR")
                .help("页面输出目录")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))))
}

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("初始化日志失败: {}", e);
    }

    let start_time = Instant::now();
    if let Err(e) = run(&matches) {
        log::error!("{}", e);
        std::process::exit(1);
    }
    info!("完成，耗时: {:.2}秒", start_time.elapsed().as_secs_f32());
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("scan", sub)) => {
            let source = required_path(sub, "source")?;
            let output = required_path(sub, "output")?;
            cmd_scan(source, output)
        }
        Some(("build", sub)) => {
            let input = required_path(sub, "input")?;
            let output = required_path(sub, "output")?;
            cmd_build(input, output)
        }
        Some(("query", sub)) => {
            let catalog = load_catalog(sub.get_one::<PathBuf>("catalog"))?;
            let state = state_from_args(sub);
            let output = if sub.get_flag("html") {
                render_article_grid(&catalog.filter(&state))
            } else {
                serde_json::to_string_pretty(&catalog.filter_result(&state))?
            };
            println!("{}", output);
            Ok(())
        }
        Some(("years", sub)) => {
            let catalog = load_catalog(sub.get_one::<PathBuf>("catalog"))?;
            for year in catalog.years() {
                println!("{}", year);
            }
            Ok(())
        }
        Some(("page", sub)) => {
            let catalog = load_catalog(sub.get_one::<PathBuf>("catalog"))?;
            let output = required_path(sub, "output")?;
            cmd_page(&catalog, output)
        }
        _ => Err(IndexerError::usage("未知的子命令")),
    }
}

fn required_path<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    matches
        .get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .ok_or_else(|| IndexerError::usage(format!("缺少参数 --{}", name)))
}

/// 命令行参数转为筛选状态，取值的解析与页面下拉列表一致
fn state_from_args(matches: &ArgMatches) -> FilterState {
    let query = matches.get_one::<String>("query").cloned().unwrap_or_default();
    let year = matches
        .get_one::<String>("year")
        .map(|y| YearFilter::parse(y))
        .unwrap_or_default();
    let theme = matches
        .get_one::<String>("theme")
        .map(|t| ThemeFilter::parse(t))
        .unwrap_or_default();

    FilterState::default()
        .with_query(query)
        .with_year(year)
        .with_theme(theme)
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ArticleCatalog> {
    match path {
        Some(path) => {
            let data = fs::read(path)?;
            let file = CompressedCatalog(&data).decode()?;
            Ok(ArticleCatalog::from_file(file)?)
        }
        None => Ok(ArticleCatalog::from_source(&DemoArticles)?),
    }
}

fn cmd_scan(source: &Path, output: &Path) -> Result<()> {
    if !source.is_dir() {
        return Err(IndexerError::usage(format!(
            "源目录不存在或不是有效目录 '{}'",
            source.display()
        )));
    }

    info!("扫描HTML文件: {}", source.display());
    let report = scan::scan_html_files(source)?;
    info!(
        "扫描完成。找到 {} 篇有效文章，跳过 {} 个文件。",
        report.articles.len(),
        report.skipped
    );

    let mut builder = CatalogBuilder::new();
    builder.extend(report.articles);
    builder.save_catalog(output)?;
    Ok(())
}

fn cmd_build(input: &Path, output: &Path) -> Result<()> {
    let json = fs::read_to_string(input)?;
    let articles = JsonArticles(json).load()?;
    info!("读取 {} 篇文章: {}", articles.len(), input.display());

    let mut builder = CatalogBuilder::new();
    builder.extend(articles);
    builder.save_catalog(output)?;
    Ok(())
}

fn cmd_page(catalog: &ArticleCatalog, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut builder = CatalogBuilder::new();
    builder.extend(catalog.articles().iter().cloned());
    builder.save_catalog(output_dir.join(CATALOG_ASSET))?;

    let html = site::render_page(
        &site::JournalProfile::iajr(),
        catalog,
        &format!("/{}", CATALOG_ASSET),
    );
    let index_path = output_dir.join("index.html");
    fs::write(&index_path, html)?;
    info!("页面已写入: {}", index_path.display());
    Ok(())
}
