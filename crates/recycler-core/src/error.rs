use crate::render_stack::ViewHolderId;

/// Misuse of the render stack or the bound data at the API boundary.
///
/// Missing measurements are never reported here: they are `None` results and
/// simply delay the next commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecyclerError {
    UnknownViewHolder {
        id: ViewHolderId,
    },
    ViewHolderAlreadyBound {
        id: ViewHolderId,
        data_index: usize,
    },
    DataIndexAlreadyBound {
        data_index: usize,
        holder: ViewHolderId,
    },
    DataIndexOutOfBounds {
        index: usize,
        count: usize,
    },
}

impl std::fmt::Display for RecyclerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecyclerError::UnknownViewHolder { id } => write!(f, "view holder {id} is not bound"),
            RecyclerError::ViewHolderAlreadyBound { id, data_index } => {
                write!(f, "view holder {id} is already bound to index {data_index}")
            }
            RecyclerError::DataIndexAlreadyBound { data_index, holder } => {
                write!(f, "index {data_index} is already bound to view holder {holder}")
            }
            RecyclerError::DataIndexOutOfBounds { index, count } => {
                write!(f, "index {index} out of bounds for {count} items")
            }
        }
    }
}

impl std::error::Error for RecyclerError {}
