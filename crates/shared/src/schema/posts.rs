use sea_query::Iden;

#[derive(Iden)]
pub enum Posts {
    Table,
    Id,
    Titulo,
    Conteudo,
    Autor,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
