use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::{setup_audit_fk, util::{default_audit_table_statement, default_table_statement, DefaultColumn}};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(schema.create_enum_from_active_enum::<RoleType>()).await?;
        manager
            .create_type(schema.create_enum_from_active_enum::<JobStatus>()).await?;
        manager
            .create_type(schema.create_enum_from_active_enum::<AttendanceStatus>()).await?;
        manager
            .create_type(schema.create_enum_from_active_enum::<PaymentFrequency>()).await?;

        manager
            .create_table(default_table_statement()
                .table(User::Table)
                .col(ColumnDef::new(User::Username)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(User::Password)
                    .binary()
                    .not_null()) // Password should be in a hashed format
                .col(ColumnDef::new(User::Role)
                    .custom(RoleType::name())
                    .not_null())
                .take()
            ).await?;

        manager
            .create_table(default_audit_table_statement()
                .table(Candidate::Table)
                .col(ColumnDef::new(Candidate::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Candidate::Email)
                    .text())
                .col(ColumnDef::new(Candidate::Phone)
                    .text())
                .col(ColumnDef::new(Candidate::Skills)
                    .json_binary()
                    .not_null())
                .col(ColumnDef::new(Candidate::Notes)
                    .text())
                .take()
            ).await?;
        setup_audit_fk!(manager, Candidate::Table);

        manager
            .create_table(default_audit_table_statement()
                .table(Opportunity::Table)
                .col(ColumnDef::new(Opportunity::Title)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Opportunity::ClientCompany)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Opportunity::RequiredSkills)
                    .json_binary()
                    .not_null())
                .col(ColumnDef::new(Opportunity::RatePerHour)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Opportunity::Status)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Opportunity::Notes)
                    .text())
                .take()
            ).await?;
        setup_audit_fk!(manager, Opportunity::Table);

        manager
            .create_table(default_audit_table_statement()
                .table(Job::Table)
                .col(ColumnDef::new(Job::CandidateId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Job::OpportunityId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Job::ClientCompany)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Job::PartnerCompany)
                    .text())
                .col(ColumnDef::new(Job::CandidateSalary)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Job::ClientBillingAmount)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Job::PaymentFrequency)
                    .custom(PaymentFrequency::name())
                    .not_null())
                .col(ColumnDef::new(Job::PaymentCurrency)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Job::StartDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Job::EndDate)
                    .date())
                .col(ColumnDef::new(Job::Status)
                    .custom(JobStatus::name())
                    .not_null())
                .col(ColumnDef::new(Job::Notes)
                    .text())
                .take()
            ).await?;
        setup_audit_fk!(manager, Job::Table);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Job::Table, Job::CandidateId)
            .to(Candidate::Table, DefaultColumn::Id)
            .take()
        ).await?;
        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Job::Table, Job::OpportunityId)
            .to(Opportunity::Table, DefaultColumn::Id)
            .take()
        ).await?;

        manager
            .create_table(default_audit_table_statement()
                .table(AttendanceRecord::Table)
                .col(ColumnDef::new(AttendanceRecord::JobId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::Status)
                    .custom(AttendanceStatus::name())
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::TimeIn)
                    .time())
                .col(ColumnDef::new(AttendanceRecord::TimeOut)
                    .time())
                .col(ColumnDef::new(AttendanceRecord::TotalHoursWorked)
                    .double()
                    .not_null()
                    .default(0.0))
                .col(ColumnDef::new(AttendanceRecord::Notes)
                    .text())
                .take()
            ).await?;
        setup_audit_fk!(manager, AttendanceRecord::Table);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(AttendanceRecord::Table, AttendanceRecord::JobId)
            .to(Job::Table, DefaultColumn::Id)
            .take()
        ).await?;

        // One ledger row per job per calendar day; upserts replace atomically
        manager.create_index(Index::create()
            .name("uq_attendance_record_job_date")
            .table(AttendanceRecord::Table)
            .col(AttendanceRecord::JobId)
            .col(AttendanceRecord::Date)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(default_audit_table_statement()
                .table(AttendanceMonth::Table)
                .col(ColumnDef::new(AttendanceMonth::JobId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(AttendanceMonth::Year)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(AttendanceMonth::Month)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(AttendanceMonth::RegularDaysWorked)
                    .integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(AttendanceMonth::WeekendDaysWorked)
                    .integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(AttendanceMonth::HolidayDaysWorked)
                    .integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(AttendanceMonth::LeavesTaken)
                    .integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(AttendanceMonth::OvertimeHours)
                    .double()
                    .not_null()
                    .default(0.0))
                .col(ColumnDef::new(AttendanceMonth::Notes)
                    .text())
                .take()
            ).await?;
        setup_audit_fk!(manager, AttendanceMonth::Table);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(AttendanceMonth::Table, AttendanceMonth::JobId)
            .to(Job::Table, DefaultColumn::Id)
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("uq_attendance_month_job_period")
            .table(AttendanceMonth::Table)
            .col(AttendanceMonth::JobId)
            .col(AttendanceMonth::Year)
            .col(AttendanceMonth::Month)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(default_audit_table_statement()
                .table(Invoice::Table)
                .col(ColumnDef::new(Invoice::JobId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Invoice::Year)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::Month)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::RegularDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::WeekendDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::HolidayDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::HalfDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::OvertimeHours)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Invoice::TotalDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::PresentDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Invoice::TotalHours)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Invoice::PerDayRate)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::BillingRegular)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::BillingWeekend)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::BillingHoliday)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::BillingOvertime)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::BillingTotal)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::SalaryTotal)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::Commission)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::NetProfit)
                    .decimal_len(16, 2)
                    .not_null())
                .col(ColumnDef::new(Invoice::Currency)
                    .text()
                    .not_null())
                .take()
            ).await?;
        setup_audit_fk!(manager, Invoice::Table);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Invoice::Table, Invoice::JobId)
            .to(Job::Table, DefaultColumn::Id)
            .take()
        ).await?;

        // Regeneration overwrites the period row in place
        manager.create_index(Index::create()
            .name("uq_invoice_job_period")
            .table(Invoice::Table)
            .col(Invoice::JobId)
            .col(Invoice::Year)
            .col(Invoice::Month)
            .unique()
            .take()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(TableDropStatement::new().table(Invoice::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(AttendanceMonth::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(AttendanceRecord::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Job::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Opportunity::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Candidate::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(User::Table).take()).await?;

        manager.drop_type(TypeDropStatement::new().name(PaymentFrequency::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(AttendanceStatus::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(JobStatus::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(RoleType::name()).to_owned()).await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum User {
    Table,
    Username,
    Password,
    Role,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
enum RoleType {
    #[sea_orm(string_value = "recruiter")]
    Recruiter,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_status")]
enum JobStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "terminated")]
    Terminated,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "half_day")]
    HalfDay,
    #[sea_orm(string_value = "leave")]
    Leave,
    #[sea_orm(string_value = "holiday")]
    Holiday,
    #[sea_orm(string_value = "weekend")]
    Weekend,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_frequency")]
enum PaymentFrequency {
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "bi_weekly")]
    BiWeekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

#[derive(Iden)]
enum Candidate {
    Table,
    Name,
    Email,
    Phone,
    Skills,
    Notes,
}

#[derive(Iden)]
enum Opportunity {
    Table,
    Title,
    ClientCompany,
    RequiredSkills,
    RatePerHour,
    Status,
    Notes,
}

#[derive(Iden)]
enum Job {
    Table,
    CandidateId,
    OpportunityId,
    ClientCompany,
    PartnerCompany,
    CandidateSalary,
    ClientBillingAmount,
    PaymentFrequency,
    PaymentCurrency,
    StartDate,
    EndDate,
    Status,
    Notes,
}

#[derive(Iden)]
enum AttendanceRecord {
    Table,
    JobId,
    Date,
    Status,
    TimeIn,
    TimeOut,
    TotalHoursWorked,
    Notes,
}

#[derive(Iden)]
enum AttendanceMonth {
    Table,
    JobId,
    Year,
    Month,
    RegularDaysWorked,
    WeekendDaysWorked,
    HolidayDaysWorked,
    LeavesTaken,
    OvertimeHours,
    Notes,
}

#[derive(Iden)]
enum Invoice {
    Table,
    JobId,
    Year,
    Month,
    RegularDays,
    WeekendDays,
    HolidayDays,
    HalfDays,
    OvertimeHours,
    TotalDays,
    PresentDays,
    TotalHours,
    PerDayRate,
    BillingRegular,
    BillingWeekend,
    BillingHoliday,
    BillingOvertime,
    BillingTotal,
    SalaryTotal,
    Commission,
    NetProfit,
    Currency,
}
