/// Row for `t_imgembed_test`.
#[derive(Debug, Clone)]
pub struct NewImageEmbedding {
    pub encname: String,
    pub originalname: String,
    /// pgvector text literal, e.g. `[0.1,0.2]`.
    pub embedding: Option<String>,
    pub imgurl: String,
}
