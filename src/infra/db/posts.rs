use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder};
use time::OffsetDateTime;
use url::Url;

use crate::application::repos::{
    CandidateFilter, CandidateTerm, PageRequest, PostId, PostSummary, PostsRepo, RepoError,
};

use super::{PostgresRepositories, escape_like, map_sqlx_error};

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: i64,
    title: String,
    permalink: String,
    published_at: OffsetDateTime,
}

impl TryFrom<CandidateRow> for PostSummary {
    type Error = RepoError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let permalink = Url::parse(&row.permalink).map_err(|err| {
            RepoError::integrity(format!("post {} has an invalid permalink: {err}", row.id))
        })?;
        Ok(PostSummary {
            id: row.id,
            title: row.title,
            permalink,
            published_at: row.published_at,
        })
    }
}

impl PostgresRepositories {
    fn apply_candidate_filter(qb: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &CandidateFilter) {
        match &filter.term {
            CandidateTerm::Any => {}
            CandidateTerm::Id(id) => {
                qb.push(" AND id = ");
                qb.push_bind(*id);
            }
            CandidateTerm::Title(term) => {
                qb.push(" AND title ILIKE ");
                qb.push_bind(format!("%{}%", escape_like(term)));
            }
        }

        if !filter.exclude.is_empty() {
            qb.push(" AND id <> ALL(");
            qb.push_bind(filter.exclude.clone());
            qb.push(")");
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn search_published_ids(
        &self,
        term: &str,
        lower_bound: OffsetDateTime,
        upper_bound: OffsetDateTime,
    ) -> Result<Vec<PostId>, RepoError> {
        let mut qb = QueryBuilder::new(
            "SELECT id FROM posts WHERE status = 'published' AND content LIKE ",
        );
        qb.push_bind(format!("%{}%", escape_like(term)));
        qb.push(" AND published_at >= ");
        qb.push_bind(lower_bound);
        qb.push(" AND published_at <= ");
        qb.push_bind(upper_bound);
        qb.push(" ORDER BY published_at DESC, id DESC");

        qb.build_query_scalar::<i64>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_candidates(
        &self,
        filter: &CandidateFilter,
        page: PageRequest,
    ) -> Result<Vec<PostSummary>, RepoError> {
        page.validate()?;

        let mut qb = QueryBuilder::new(
            "SELECT id, title, permalink, published_at FROM posts \
             WHERE status = 'published' AND published_at IS NOT NULL",
        );
        Self::apply_candidate_filter(&mut qb, filter);
        qb.push(" ORDER BY published_at DESC, id DESC LIMIT ");
        qb.push_bind(i64::from(page.per_page));
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let rows = qb
            .build_query_as::<CandidateRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(PostSummary::try_from).collect()
    }

    async fn count_candidates(&self, filter: &CandidateFilter) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new(
            "SELECT COUNT(*) FROM posts \
             WHERE status = 'published' AND published_at IS NOT NULL",
        );
        Self::apply_candidate_filter(&mut qb, filter);

        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(total.max(0) as u64)
    }
}
