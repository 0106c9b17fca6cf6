//! Error type for every user-triggered operation. Messages are the ones shown
//! in the footer, so they stay in the same language as the rest of the UI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// A form submission with at least one empty field (or an unknown status).
    #[error("Todos os campos devem ser preenchidos")]
    Validation,

    /// Delete requested with nothing highlighted in the table.
    #[error("Selecione um cliente para excluir")]
    Selection,

    /// Image export requested while the table holds no rows.
    #[error("A tabela está vazia. Adicione clientes antes de salvar a imagem.")]
    EmptyData,

    #[error("Não foi possível atualizar a planilha: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Não foi possível salvar a imagem: {0}")]
    Image(#[from] image::ImageError),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// True for failures that happened while writing an export file.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Spreadsheet(_) | ClientError::Image(_) | ClientError::Io(_)
        )
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
