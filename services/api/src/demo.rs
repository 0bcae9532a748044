use crate::infra::{in_memory_service, load_receipt};
use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    Item, Receipt, ReceiptServiceError, ReceiptStore, ScoreOutcome,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    #[arg(long)]
    pub(crate) file: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let receipt = load_receipt(&args.file)?;
    let service = in_memory_service();
    let outcome = service.preview(&receipt)?;

    println!("Receipt from {}", receipt.retailer.trim());
    println!(
        "Purchased {} at {}, total {}",
        receipt.purchase_date, receipt.purchase_time, receipt.total
    );
    render_breakdown(&outcome);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = in_memory_service();

    println!("Receipt points demo");
    for receipt in sample_receipts() {
        let retailer = receipt.retailer.clone();
        let id = service.submit(receipt)?;
        let record = service.record(&id)?;
        println!("\n{retailer} -> id {id}");
        if let Some(record) = record {
            render_breakdown(&ScoreOutcome {
                total: record.points,
                components: record.components,
            });
        }
    }

    let resubmitted = sample_receipts().remove(0);
    let retailer = resubmitted.retailer.clone();
    let id = service.submit(resubmitted)?;
    println!("\nResubmitted {retailer} -> id {id} (existing record reused)");

    let stored = service
        .store()
        .len()
        .map_err(ReceiptServiceError::from)?;
    println!("Records stored: {stored}");
    Ok(())
}

fn render_breakdown(outcome: &ScoreOutcome) {
    for component in &outcome.components {
        println!(
            "- {:<24} {:>4}  {}",
            component.rule.label(),
            component.points,
            component.notes
        );
    }
    println!("Total points: {}", outcome.total);
}

fn sample_receipts() -> Vec<Receipt> {
    vec![
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![
                Item::new("Mountain Dew 12PK", "6.49"),
                Item::new("Emils Cheese Pizza", "12.25"),
                Item::new("Knorr Creamy Chicken", "1.26"),
                Item::new("Doritos Nacho Cheese", "3.35"),
                Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            total: "35.35".to_string(),
            ..Receipt::default()
        },
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("Gatorade", "2.25"); 4],
            total: "9.00".to_string(),
            ..Receipt::default()
        },
    ]
}
