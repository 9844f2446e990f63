use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;

use blacklist_checker::diag::ConsoleSink;
use blacklist_checker::{categorize, cli, config, error, export, ip, report};
use cli::{Cli, Commands};
use config::Config;
use error::{CheckerError, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Check {
            report: report_arg,
            admin_no,
            web_no,
            white_list,
            black_list,
            output,
        } => {
            println!("🛡 blacklist-checker - エラー報告レポートIPチェック\n");

            let report_path = match report_arg {
                Some(path) => path,
                None => config.default_report_path()?,
            };
            let admin_no_list =
                cli::parse_no_list(admin_no.as_deref().unwrap_or(&config.admin_no_list))?;
            let web_no_list =
                cli::parse_no_list(web_no.as_deref().unwrap_or(&config.web_no_list))?;
            let white_path = match white_list {
                Some(path) => path,
                None => config.white_list_path()?,
            };
            let black_path = match black_list {
                Some(path) => path,
                None => config.black_list_path()?,
            };

            file_exists("エラー報告レポート", &report_path)?;
            file_exists("IPホワイトリスト", &white_path)?;
            file_exists("IPブラックリスト", &black_path)?;

            // 1. IPリスト読み込み
            println!("[1/4] IPリストを読み込み中...");
            println!("ホワイトリスト読み込み path={}", white_path.display());
            let white_ip_list = ip::load_ip_addresses(&white_path)?;
            println!("ホワイトリスト読み込み結果");
            print_ips(&white_ip_list);
            println!("ブラックリスト読み込み path={}", black_path.display());
            let black_ip_list = ip::load_ip_addresses(&black_path)?;
            println!("ブラックリスト読み込み結果");
            print_ips(&black_ip_list);
            println!("✔ 読み込み完了\n");

            // 2. 該当エラーIP抽出
            println!("[2/4] 該当エラーIPを抽出中... path={}", report_path.display());
            let mut sink = ConsoleSink;
            let scan =
                report::extract_error_ips(&report_path, &admin_no_list, &web_no_list, &mut sink)?;
            println!("該当エラーIP抽出結果");
            print_ips(&categorize::unique_sorted(&scan.ips));
            println!("✔ 抽出完了\n");

            // 3. 振り分け
            println!("[3/4] 該当エラーIPを振り分け中...");
            let result = categorize::categorize_ips(
                &scan.ips,
                &white_ip_list,
                &black_ip_list,
                &scan.admin_matches,
                &scan.web_matches,
                &mut sink,
            );
            println!("✔ 振り分け完了\n");

            // 4. CSV出力
            println!("[4/4] CSVを出力中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let output_path = output_dir.join(export::output_file_name(Local::now().date_naive()));
            export::write_categorized_csv(&result, &output_path)?;
            println!("✔ 結果を保存: {}", output_path.display());

            println!("\n✅ チェック完了");
        }

        Commands::Extract { input } => {
            println!("🔍 blacklist-checker - IP抽出\n");

            file_exists("入力ファイル", &input)?;
            let ips = ip::load_ip_addresses(&input)?;
            if ips.is_empty() {
                println!("IPアドレスは見つかりませんでした");
            } else {
                print_ips(&ips);
                println!("\n✅ {}件のIPを抽出", ips.len());
            }
        }

        Commands::Config {
            set_admin_no,
            set_web_no,
            set_download_dir,
            show,
        } => {
            let mut config = config;

            if let Some(no_list) = set_admin_no {
                // 保存前に形式だけ確認する
                cli::parse_no_list(&no_list)?;
                config.admin_no_list = no_list;
                config.save()?;
                println!("✔ admin側エラー番号を設定しました");
            }

            if let Some(no_list) = set_web_no {
                cli::parse_no_list(&no_list)?;
                config.web_no_list = no_list;
                config.save()?;
                println!("✔ web側エラー番号を設定しました");
            }

            if let Some(dir) = set_download_dir {
                config.download_dir = Some(dir);
                config.save()?;
                println!("✔ ダウンロードフォルダを設定しました");
            }

            if show {
                println!("設定:");
                println!("  admin側エラー番号: {}", config.admin_no_list);
                println!("  web側エラー番号: {}", config.web_no_list);
                println!("  ホワイトリスト: {}", config.white_list_path()?.display());
                println!("  ブラックリスト: {}", config.black_list_path()?.display());
                println!("  レポート既定パス: {}", config.default_report_path()?.display());
            }
        }
    }

    Ok(())
}

fn file_exists(item: &str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CheckerError::FileNotFound {
            item: item.to_string(),
            path: path.display().to_string(),
        })
    }
}

fn print_ips(ips: &[Ipv4Addr]) {
    for ip in ips {
        println!("{}", ip);
    }
}
