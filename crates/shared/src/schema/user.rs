use sea_query::Iden;

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    AppRole,
    Role,
    CreatedAt,
    UpdatedAt,
}
