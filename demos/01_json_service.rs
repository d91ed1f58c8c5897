/// json service - the calls a http layer makes, with logging turned on
use installment_loans::logging::init_logger;
use installment_loans::{ErrorClass, LedgerConfig, LoanService, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_json_str(
        r#"{
            "products": [
                {"name": "Смартфон", "gracePeriodMonths": 9, "surchargePercentPerPeriod": 3},
                {"name": "Телевизор", "gracePeriodMonths": 18, "surchargePercentPerPeriod": 5, "allowedPeriods": [12, 18, 24]}
            ],
            "seedSampleLoans": true,
            "logging": {"json": true}
        }"#,
    )?;
    init_logger(&config.logging);

    let time = SafeTimeProvider::new(TimeSource::System);
    let service = LoanService::from_config(&config, &time)?;

    let requests = [
        r#"{"product":"Телевизор","phone":"+998901234567","month":24,"price":4500}"#,
        r#"{"product":"Телевизор","phone":"+998901234567","month":6,"price":4500}"#,
        r#"{"product":"Смартфон","phone":"998901234567","month":12,"price":900}"#,
        r#"{"product":"Смартфон""#,
    ];

    for body in requests {
        match service.submit_json(body, &time) {
            Ok(json) => println!("201 {}", json),
            Err(e) => {
                let status = match e.class() {
                    ErrorClass::ClientInput => 400,
                    ErrorClass::NotFound => 404,
                    ErrorClass::Internal => 500,
                };
                println!("{} {}", status, e);
            }
        }
    }

    println!("200 {}", service.record_transaction_json(r#"{"loanID":3,"amount":1000}"#, &time)?);
    println!("200 {}", service.list_json()?);

    Ok(())
}
