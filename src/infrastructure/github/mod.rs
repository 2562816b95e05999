pub mod contents;

pub use contents::{
    decode_content, encode_content, GitHubContentsClient, GitHubError, PutFileRequest, RemoteFile,
    DEFAULT_GITHUB_API_URL,
};
