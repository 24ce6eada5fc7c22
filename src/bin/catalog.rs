//! 商品目录命令行前端
//! 通过 HTTP API 浏览、创建、编辑和删除商品

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, Level};

use pot_catalog::client::{
    CatalogClient, CatalogView, ProductDraft, ViewError, DEFAULT_BASE_URL,
};
use pot_catalog::Product;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Browse and edit the pot shop catalog")]
struct Cli {
    /// API 地址
    #[arg(long, env = "CATALOG_API", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 列出全部商品
    List,
    /// 查看单个商品
    Show { id: String },
    /// 添加商品
    Add(AddArgs),
    /// 编辑商品，只修改给出的字段
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// 删除商品
    Rm {
        id: String,
        /// 不再询问确认
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    quantity: String,
}

#[derive(Debug, Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
}

impl From<AddArgs> for ProductDraft {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            description: args.description,
            price: args.price,
            quantity: args.quantity,
        }
    }
}

impl EditArgs {
    fn apply(self, draft: &mut ProductDraft) {
        let fields = [
            (self.name, &mut draft.name),
            (self.price, &mut draft.price),
            (self.category, &mut draft.category),
            (self.description, &mut draft.description),
            (self.quantity, &mut draft.quantity),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = CatalogClient::new(cli.base_url)?;
    debug!(base_url = client.base_url(), "catalog client ready");
    let mut view = CatalogView::new(client);

    match cli.command {
        Command::List => {
            let products = view.load().await?;
            print_table(products);
        }
        Command::Show { id } => {
            let product = view
                .client()
                .get_product(&id)
                .await
                .map_err(ViewError::Load)?;
            print_details(&product);
        }
        Command::Add(args) => {
            let product = view.create(&ProductDraft::from(args)).await?;
            println!("✅ 已创建商品 {}", product.id);
            print_details(&product);
        }
        Command::Edit { id, fields } => {
            view.load().await?;
            let mut draft = match view.find(&id) {
                Some(product) => ProductDraft::from(product),
                None => anyhow::bail!("product {id} not found"),
            };
            fields.apply(&mut draft);
            let product = view.update(&id, &draft).await?;
            println!("✅ 已更新商品 {}", product.id);
            print_details(&product);
        }
        Command::Rm { id, yes } => {
            if !yes && !confirm(&format!("Delete product {id}?"))? {
                println!("已取消");
                return Ok(());
            }
            view.delete(&id).await?;
            println!("🗑️  已删除商品 {id}");
        }
    }

    Ok(())
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_table(products: &[Product]) {
    if products.is_empty() {
        println!("(no products)");
        return;
    }

    println!(
        "{:<8} {:<32} {:<14} {:>10} {:>6}",
        "ID", "NAME", "CATEGORY", "PRICE", "QTY"
    );
    for p in products {
        println!(
            "{:<8} {:<32} {:<14} {:>10.2} {:>6}",
            p.id,
            truncate(&p.name, 32),
            truncate(&p.category, 14),
            p.price,
            p.quantity
        );
    }
    println!("共 {} 个商品", products.len());
}

fn print_details(product: &Product) {
    println!("  id:          {}", product.id);
    println!("  name:        {}", product.name);
    println!("  category:    {}", product.category);
    println!("  description: {}", product.description);
    println!("  price:       {:.2}", product.price);
    println!("  quantity:    {}", product.quantity);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
